use crate::error::ClassifyError;
use crate::models::classify_types::{ClassificationResult, PredictResponse, ServiceAvailability};
use crate::models::file_types::SelectedFile;
use crate::models::widget_state::{WidgetSnapshot, WidgetState};
use crate::notification::{Notification, NoopObserver, WidgetObserver};
use crate::services::classifier_client::ClassifierClient;
use log::{info, warn};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

struct Inner {
    state: WidgetState,
    availability: ServiceAvailability,
    /// Bumped by every selection and reset; an outcome is applied only if
    /// its generation is still current.
    generation: u64,
    cancel: Option<CancellationToken>,
    revision: u64,
}

impl Inner {
    fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot::capture(&self.state, self.availability, self.revision)
    }

    /// Snapshot for a change made under the current lock.
    fn publish(&mut self) -> WidgetSnapshot {
        self.revision += 1;
        self.snapshot()
    }
}

/// The upload-and-classify widget.
///
/// Safe to share behind an `Arc`; the state lock is never held across an
/// await, and at most one classification is live at a time. Selecting a new
/// file (or resetting) cancels the request it supersedes.
pub struct ClassifyWidget {
    client: ClassifierClient,
    inner: Mutex<Inner>,
    observer: Arc<dyn WidgetObserver>,
    activation: OnceCell<ServiceAvailability>,
}

impl ClassifyWidget {
    pub fn new(client: ClassifierClient, observer: Arc<dyn WidgetObserver>) -> Self {
        Self {
            client,
            inner: Mutex::new(Inner {
                state: WidgetState::Empty,
                availability: ServiceAvailability::default(),
                generation: 0,
                cancel: None,
                revision: 0,
            }),
            observer,
            activation: OnceCell::new(),
        }
    }

    pub fn headless(client: ClassifierClient) -> Self {
        Self::new(client, Arc::new(NoopObserver))
    }

    pub fn client(&self) -> &ClassifierClient {
        &self.client
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        self.lock().snapshot()
    }

    pub fn availability(&self) -> ServiceAvailability {
        self.lock().availability
    }

    pub fn is_processing(&self) -> bool {
        self.lock().state.is_processing()
    }

    /// Probes the service the first time it is called; later calls return
    /// that first outcome without touching the network.
    pub async fn activate(&self) -> ServiceAvailability {
        *self
            .activation
            .get_or_init(|| async { self.probe_service().await })
            .await
    }

    pub async fn probe_service(&self) -> ServiceAvailability {
        let availability = self.client.probe().await;
        let snapshot = {
            let mut inner = self.lock();
            inner.availability = availability;
            inner.publish()
        };
        self.observer.state_changed(&snapshot);
        availability
    }

    /// File-picker entry point.
    pub async fn select_path(&self, path: &Path) -> Result<ClassificationResult, ClassifyError> {
        let file = SelectedFile::from_path(path).await?;
        self.select_file(file).await
    }

    /// Replaces the selection, drops any previous result and classifies the
    /// new file.
    pub async fn select_file(
        &self,
        file: SelectedFile,
    ) -> Result<ClassificationResult, ClassifyError> {
        info!("Selected {} ({}, {} bytes)", file.name, file.mime, file.size());
        let (generation, token) = self.begin(file.clone());
        self.run(generation, token, file).await
    }

    /// Classifies the retained file again after a failure.
    pub async fn retry(&self) -> Result<ClassificationResult, ClassifyError> {
        let file = self
            .lock()
            .state
            .file()
            .cloned()
            .ok_or(ClassifyError::NothingSelected)?;
        info!("Retrying classification of {}", file.name);
        let (generation, token) = self.begin(file.clone());
        self.run(generation, token, file).await
    }

    pub fn reset(&self) {
        let snapshot = {
            let mut inner = self.lock();
            if let Some(token) = inner.cancel.take() {
                token.cancel();
            }
            inner.generation += 1;
            inner.state = WidgetState::Empty;
            inner.publish()
        };
        info!("Widget reset");
        self.observer.state_changed(&snapshot);
    }

    fn begin(&self, file: SelectedFile) -> (u64, CancellationToken) {
        let token = CancellationToken::new();
        let (generation, snapshot) = {
            let mut inner = self.lock();
            if let Some(previous) = inner.cancel.replace(token.clone()) {
                previous.cancel();
            }
            inner.generation += 1;
            inner.state = WidgetState::Processing { file };
            (inner.generation, inner.publish())
        };
        self.observer.state_changed(&snapshot);
        (generation, token)
    }

    async fn run(
        &self,
        generation: u64,
        token: CancellationToken,
        file: SelectedFile,
    ) -> Result<ClassificationResult, ClassifyError> {
        let mut guard = InFlight {
            widget: self,
            generation,
            armed: true,
        };

        let started = Instant::now();
        let outcome = tokio::select! {
            _ = token.cancelled() => Err(ClassifyError::Superseded),
            response = self.client.predict(&file) => response,
        };
        let elapsed = started.elapsed();

        guard.armed = false;
        self.finish(generation, file, outcome.map(|r| (r, elapsed)))
    }

    fn finish(
        &self,
        generation: u64,
        file: SelectedFile,
        outcome: Result<(PredictResponse, Duration), ClassifyError>,
    ) -> Result<ClassificationResult, ClassifyError> {
        let (result, notification, snapshot) = {
            let mut inner = self.lock();
            if inner.generation != generation {
                info!("Discarding superseded classification of {}", file.name);
                return Err(ClassifyError::Superseded);
            }
            inner.cancel = None;

            match outcome {
                Ok((response, elapsed)) => {
                    let completed_at = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
                    let result = ClassificationResult::from_response(
                        response,
                        elapsed.as_secs_f64(),
                        completed_at,
                    );
                    info!(
                        "Classified {} as {} ({} in {})",
                        file.name,
                        result.label,
                        result.confidence_display(),
                        result.elapsed_display()
                    );
                    let notification = Notification::analysis_complete(&result);
                    inner.state = WidgetState::Result {
                        file,
                        result: result.clone(),
                    };
                    (
                        Ok(result),
                        Some(notification),
                        inner.publish(),
                    )
                }
                Err(err) => {
                    warn!("Classification of {} failed: {}", file.name, err);
                    if matches!(err, ClassifyError::Unreachable(_)) {
                        inner.availability = ServiceAvailability::Offline;
                    }
                    let notification = Notification::for_error(&err);
                    inner.state = WidgetState::Failed {
                        file,
                        message: err.to_string(),
                    };
                    (
                        Err(err),
                        notification,
                        inner.publish(),
                    )
                }
            }
        };

        self.observer.state_changed(&snapshot);
        if let Some(notification) = notification {
            self.observer.notify(&notification);
        }
        result
    }
}

/// Clears the processing phase if the classifying future is dropped before
/// it finishes.
struct InFlight<'a> {
    widget: &'a ClassifyWidget,
    generation: u64,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let snapshot = {
            let mut inner = self.widget.lock();
            if inner.generation != self.generation {
                return;
            }
            let file = match &inner.state {
                WidgetState::Processing { file } => file.clone(),
                _ => return,
            };
            if let Some(token) = inner.cancel.take() {
                token.cancel();
            }
            warn!("Classification of {} abandoned", file.name);
            inner.state = WidgetState::Failed {
                file,
                message: "classification interrupted".to_string(),
            };
            inner.publish()
        };
        self.widget.observer.state_changed(&snapshot);
    }
}
