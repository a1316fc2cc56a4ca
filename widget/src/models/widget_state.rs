use super::classify_types::{ClassificationResult, ServiceAvailability};
use super::file_types::{FileSummary, SelectedFile};
use serde::Serialize;

/// One tagged value per widget instead of separate file/result/processing
/// fields, so partial updates can't leave them disagreeing.
#[derive(Debug, Clone, Default)]
pub enum WidgetState {
    #[default]
    Empty,
    Processing {
        file: SelectedFile,
    },
    Result {
        file: SelectedFile,
        result: ClassificationResult,
    },
    Failed {
        file: SelectedFile,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetPhase {
    Empty,
    Processing,
    Result,
    Failed,
}

impl WidgetState {
    pub fn phase(&self) -> WidgetPhase {
        match self {
            WidgetState::Empty => WidgetPhase::Empty,
            WidgetState::Processing { .. } => WidgetPhase::Processing,
            WidgetState::Result { .. } => WidgetPhase::Result,
            WidgetState::Failed { .. } => WidgetPhase::Failed,
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        match self {
            WidgetState::Empty => None,
            WidgetState::Processing { file }
            | WidgetState::Result { file, .. }
            | WidgetState::Failed { file, .. } => Some(file),
        }
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            WidgetState::Result { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, WidgetState::Processing { .. })
    }
}

/// What the UI renders. `revision` grows with every state change, so a
/// host that receives snapshots out of order keeps the highest one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSnapshot {
    pub revision: u64,
    pub phase: WidgetPhase,
    pub processing: bool,
    pub availability: ServiceAvailability,
    pub file: Option<FileSummary>,
    pub result: Option<ClassificationResult>,
    pub last_error: Option<String>,
}

impl WidgetSnapshot {
    pub fn capture(state: &WidgetState, availability: ServiceAvailability, revision: u64) -> Self {
        let last_error = match state {
            WidgetState::Failed { message, .. } => Some(message.clone()),
            _ => None,
        };
        Self {
            revision,
            phase: state.phase(),
            processing: state.is_processing(),
            availability,
            file: state.file().map(SelectedFile::summary),
            result: state.result().cloned(),
            last_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> SelectedFile {
        SelectedFile::from_bytes("cow.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]).unwrap()
    }

    #[test]
    fn empty_snapshot_has_nothing_selected() {
        let snapshot =
            WidgetSnapshot::capture(&WidgetState::Empty, ServiceAvailability::Checking, 0);
        assert_eq!(snapshot.phase, WidgetPhase::Empty);
        assert!(!snapshot.processing);
        assert!(snapshot.file.is_none());
        assert!(snapshot.result.is_none());
    }

    #[test]
    fn failed_state_keeps_file_but_no_result() {
        let state = WidgetState::Failed {
            file: file(),
            message: "API Error: 500".into(),
        };
        let snapshot = WidgetSnapshot::capture(&state, ServiceAvailability::Online, 3);
        assert_eq!(snapshot.phase, WidgetPhase::Failed);
        assert_eq!(snapshot.file.unwrap().name, "cow.jpg");
        assert!(snapshot.result.is_none());
        assert_eq!(snapshot.last_error.as_deref(), Some("API Error: 500"));
    }

    #[test]
    fn only_processing_sets_the_flag() {
        assert!(WidgetState::Processing { file: file() }.is_processing());
        assert!(!WidgetState::Empty.is_processing());
        assert!(!WidgetState::Failed {
            file: file(),
            message: String::new()
        }
        .is_processing());
    }

    #[test]
    fn snapshot_serialises_camel_case() {
        let json = serde_json::to_value(WidgetSnapshot::capture(
            &WidgetState::Processing { file: file() },
            ServiceAvailability::Online,
            7,
        ))
        .unwrap();
        assert_eq!(json["phase"], "processing");
        assert_eq!(json["availability"], "online");
        assert_eq!(json["file"]["size"], 3);
        assert_eq!(json["revision"], 7);
    }
}
