//! Toast-style notifications, delivered through an observer so the state
//! machine never needs a UI host.

use crate::error::{ClassifyError, ClassifyErrorKind};
use crate::models::classify_types::ClassificationResult;
use crate::models::widget_state::WidgetSnapshot;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    fn destructive(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn analysis_complete(result: &ClassificationResult) -> Self {
        Self {
            title: "Analysis Complete".to_string(),
            description: format!(
                "Detected: {} ({:.1}% confidence)",
                result.label, result.confidence_percent
            ),
            variant: NotificationVariant::Default,
        }
    }

    pub fn request_timeout() -> Self {
        Self::destructive(
            "Request Timeout",
            "The analysis took too long. Please try again.",
        )
    }

    pub fn backend_offline() -> Self {
        Self::destructive(
            "Backend Offline",
            "Cannot connect to the classification service. Please ensure the backend is running.",
        )
    }

    pub fn analysis_failed(message: &str) -> Self {
        let description = if message.trim().is_empty() {
            "An error occurred during image analysis.".to_string()
        } else {
            message.to_string()
        };
        Self::destructive("Analysis Failed", description)
    }

    /// The notification for a failed classification, or `None` when the
    /// failure should stay silent (a superseded request).
    pub fn for_error(err: &ClassifyError) -> Option<Self> {
        match err.kind() {
            ClassifyErrorKind::Timeout => Some(Self::request_timeout()),
            ClassifyErrorKind::Unreachable => Some(Self::backend_offline()),
            ClassifyErrorKind::Superseded => None,
            ClassifyErrorKind::Rejected | ClassifyErrorKind::Invalid => {
                Some(Self::analysis_failed(&err.to_string()))
            }
        }
    }
}

pub trait WidgetObserver: Send + Sync {
    fn notify(&self, notification: &Notification);

    fn state_changed(&self, _snapshot: &WidgetSnapshot) {}
}

/// Observer for headless use; drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl WidgetObserver for NoopObserver {
    fn notify(&self, _notification: &Notification) {}
}
