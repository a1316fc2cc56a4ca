use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceAvailability {
    #[default]
    Checking,
    Online,
    Offline,
}

/// Body of a successful `POST /predict`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictResponse {
    pub predicted_breed: String,
    pub confidence: f64,
    #[serde(default)]
    pub class_index: Option<u32>,
    #[serde(default)]
    pub model_version: Option<String>,
}

impl PredictResponse {
    /// Rejects bodies that parsed but cannot be shown as a result.
    pub fn validate(&self) -> Result<(), String> {
        if self.predicted_breed.trim().is_empty() {
            return Err("predicted_breed is empty".to_string());
        }
        if !self.confidence.is_finite() || !(0.0..=100.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside 0-100", self.confidence));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub label: String,
    pub confidence_percent: f64,
    pub elapsed_seconds: f64,
    pub completed_at: String,
    pub class_index: Option<u32>,
    pub model_version: Option<String>,
}

impl ClassificationResult {
    pub fn from_response(
        response: PredictResponse,
        elapsed_secs: f64,
        completed_at: String,
    ) -> Self {
        Self {
            label: response.predicted_breed,
            confidence_percent: response.confidence,
            elapsed_seconds: round_tenths(elapsed_secs),
            completed_at,
            class_index: response.class_index,
            model_version: response.model_version,
        }
    }

    /// "92.3%"
    pub fn confidence_display(&self) -> String {
        format!("{:.1}%", self.confidence_percent)
    }

    /// "1.2s"
    pub fn elapsed_display(&self) -> String {
        format!("{:.1}s", self.elapsed_seconds)
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `GET /classes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassList {
    pub classes: BTreeMap<String, String>,
    pub total_classes: usize,
}

impl ClassList {
    /// Class names ordered by their numeric index.
    pub fn names(&self) -> Vec<String> {
        let mut indexed: Vec<(usize, &String)> = self
            .classes
            .iter()
            .map(|(k, v)| (k.parse::<usize>().unwrap_or(usize::MAX), v))
            .collect();
        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, name)| name.clone()).collect()
    }
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}
