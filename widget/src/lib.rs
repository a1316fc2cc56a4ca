//! Core of the ATC breed demo: the upload-and-classify widget, its HTTP client
//! for the remote classification service, and the notification side channel.
//!
//! Nothing in this crate depends on a UI host. The desktop shell drives
//! [`ClassifyWidget`] through Tauri commands and renders whatever the
//! [`WidgetObserver`] it installs receives.

pub mod config;
pub mod error;
pub mod models;
pub mod notification;
pub mod services;
pub mod widget;

pub use config::WidgetConfig;
pub use error::{ClassifyError, ClassifyErrorKind};
pub use models::classify_types::{
    ClassList, ClassificationResult, HealthStatus, PredictResponse, ServiceAvailability,
};
pub use models::file_types::{FileSummary, SelectedFile};
pub use models::widget_state::{WidgetPhase, WidgetSnapshot, WidgetState};
pub use notification::{Notification, NotificationVariant, NoopObserver, WidgetObserver};
pub use services::classifier_client::ClassifierClient;
pub use widget::ClassifyWidget;
