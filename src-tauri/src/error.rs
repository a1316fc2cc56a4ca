use atc_widget::{ClassifyError, ClassifyErrorKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct AppError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ClassifyErrorKind>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ClassifyError> for AppError {
    fn from(err: ClassifyError) -> Self {
        AppError {
            kind: Some(err.kind()),
            message: err.to_string(),
        }
    }
}

impl From<tauri_plugin_dialog::Error> for AppError {
    fn from(err: tauri_plugin_dialog::Error) -> Self {
        AppError {
            message: err.to_string(),
            kind: None,
        }
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError { message: msg, kind: None }
    }
}
