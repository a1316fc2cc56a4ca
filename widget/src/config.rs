use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Base address baked in at build time; `ATC_API_BASE` overrides the loopback default.
pub const DEFAULT_BASE_URL: &str = match option_env!("ATC_API_BASE") {
    Some(url) => url,
    None => "http://127.0.0.1:8000",
};

pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_CLASSIFY_TIMEOUT_MS: u64 = 30_000;

const ENV_BASE_URL: &str = "ATC_API_BASE";
const ENV_PROBE_TIMEOUT: &str = "ATC_PROBE_TIMEOUT_MS";
const ENV_CLASSIFY_TIMEOUT: &str = "ATC_CLASSIFY_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    pub base_url: String,
    pub probe_timeout_ms: u64,
    pub classify_timeout_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            classify_timeout_ms: DEFAULT_CLASSIFY_TIMEOUT_MS,
        }
    }
}

impl WidgetConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults, then the JSON file at `path` if it exists and parses, then
    /// environment overrides.
    pub fn load(path: &Path) -> Self {
        let from_file = if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                    warn!("Ignoring unparsable config {}: {}", path.display(), e);
                    Self::default()
                }),
                Err(e) => {
                    warn!("Failed to read config {}: {}", path.display(), e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        from_file
            .with_valid_timeouts()
            .apply_overrides(|key| std::env::var(key).ok())
    }

    /// Zero timeouts would fail every request; they fall back to the defaults.
    pub fn with_valid_timeouts(mut self) -> Self {
        if self.probe_timeout_ms == 0 {
            warn!("probeTimeoutMs must be greater than zero, using {}", DEFAULT_PROBE_TIMEOUT_MS);
            self.probe_timeout_ms = DEFAULT_PROBE_TIMEOUT_MS;
        }
        if self.classify_timeout_ms == 0 {
            warn!(
                "classifyTimeoutMs must be greater than zero, using {}",
                DEFAULT_CLASSIFY_TIMEOUT_MS
            );
            self.classify_timeout_ms = DEFAULT_CLASSIFY_TIMEOUT_MS;
        }
        self
    }

    /// Applies overrides from `lookup`, which is `std::env::var` outside tests.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(ms) = parse_millis(lookup(ENV_PROBE_TIMEOUT), ENV_PROBE_TIMEOUT) {
            self.probe_timeout_ms = ms;
        }
        if let Some(ms) = parse_millis(lookup(ENV_CLASSIFY_TIMEOUT), ENV_CLASSIFY_TIMEOUT) {
            self.classify_timeout_ms = ms;
        }
        self
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn classify_timeout(&self) -> Duration {
        Duration::from_millis(self.classify_timeout_ms)
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn root_url(&self) -> String {
        format!("{}/", self.base())
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base())
    }

    pub fn classes_url(&self) -> String {
        format!("{}/classes", self.base())
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base())
    }
}

fn parse_millis(raw: Option<String>, key: &str) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            warn!("{} must be greater than zero, keeping previous value", key);
            None
        }
        Ok(ms) => Some(ms),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}
