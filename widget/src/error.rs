use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Coarse outcome class of a failed classification, used to pick the
/// notification the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassifyErrorKind {
    Timeout,
    Unreachable,
    Rejected,
    Invalid,
    Superseded,
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("request timed out after {:.1}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("cannot reach classification service: {0}")]
    Unreachable(String),

    #[error("API Error: {status} {message}")]
    Rejected { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid file: {0}")]
    InvalidFile(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request superseded by a newer selection")]
    Superseded,

    #[error("no file selected")]
    NothingSelected,

    #[error("request failed: {0}")]
    Transport(String),
}

impl ClassifyError {
    pub fn kind(&self) -> ClassifyErrorKind {
        match self {
            ClassifyError::Timeout(_) => ClassifyErrorKind::Timeout,
            ClassifyError::Unreachable(_) => ClassifyErrorKind::Unreachable,
            ClassifyError::Rejected { .. }
            | ClassifyError::MalformedResponse(_)
            | ClassifyError::Transport(_) => ClassifyErrorKind::Rejected,
            ClassifyError::InvalidFile(_)
            | ClassifyError::Io { .. }
            | ClassifyError::NothingSelected => ClassifyErrorKind::Invalid,
            ClassifyError::Superseded => ClassifyErrorKind::Superseded,
        }
    }

    /// Maps a transport error onto the taxonomy. `timeout` is the bound that
    /// was applied to the request, reported back in the `Timeout` variant.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ClassifyError::Timeout(timeout)
        } else if err.is_connect() {
            ClassifyError::Unreachable(err.to_string())
        } else if err.is_decode() {
            ClassifyError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ClassifyError::Rejected {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ClassifyError::Transport(err.to_string())
        }
    }
}
