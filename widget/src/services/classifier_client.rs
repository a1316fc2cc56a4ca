use crate::config::WidgetConfig;
use crate::error::ClassifyError;
use crate::models::classify_types::{ClassList, HealthStatus, PredictResponse, ServiceAvailability};
use crate::models::file_types::SelectedFile;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the remote classification service.
#[derive(Clone)]
pub struct ClassifierClient {
    http: reqwest::Client,
    config: WidgetConfig,
}

impl ClassifierClient {
    pub fn new(config: WidgetConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    pub fn with_http_client(config: WidgetConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// `GET <base>/`. Never fails: anything but a 2xx is `Offline`.
    pub async fn probe(&self) -> ServiceAvailability {
        let url = self.config.root_url();
        let result = self
            .http
            .get(&url)
            .timeout(self.config.probe_timeout())
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!("Classification service online at {}", url);
                ServiceAvailability::Online
            }
            Ok(response) => {
                warn!("Liveness probe {} returned HTTP {}", url, response.status());
                ServiceAvailability::Offline
            }
            Err(e) => {
                warn!("Liveness probe {} failed: {}", url, e);
                ServiceAvailability::Offline
            }
        }
    }

    /// `POST <base>/predict` with a multipart `file` field.
    pub async fn predict(&self, file: &SelectedFile) -> Result<PredictResponse, ClassifyError> {
        let url = self.config.predict_url();
        let timeout = self.config.classify_timeout();

        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| {
                ClassifyError::InvalidFile(format!("bad MIME type {:?}: {}", file.mime, e))
            })?;
        let form = Form::new().part("file", part);

        debug!("POST {} ({}, {} bytes)", url, file.name, file.size());

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ClassifyError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = status.canonical_reason().unwrap_or("Unknown Status");
            let message = match server_detail(&body) {
                Some(detail) => format!("{}: {}", reason, detail),
                None => reason.to_string(),
            };
            return Err(ClassifyError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClassifyError::from_reqwest(e, timeout))?;
        let parsed: PredictResponse = serde_json::from_slice(&body)
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;
        parsed.validate().map_err(ClassifyError::MalformedResponse)?;

        Ok(parsed)
    }

    /// `GET <base>/classes`
    pub async fn list_classes(&self) -> Result<ClassList, ClassifyError> {
        self.get_json(&self.config.classes_url(), self.config.probe_timeout())
            .await
    }

    /// `GET <base>/health`
    pub async fn health(&self) -> Result<HealthStatus, ClassifyError> {
        self.get_json(&self.config.health_url(), self.config.probe_timeout())
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<T, ClassifyError> {
        let response = self
            .http
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ClassifyError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Rejected {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClassifyError::from_reqwest(e, timeout))
    }
}

/// FastAPI error bodies look like `{"detail": "..."}`.
fn server_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match &value["detail"] {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
