use crate::error::AppError;
use atc_widget::{ClassList, ClassifyWidget, HealthStatus, ServiceAvailability};
use std::sync::Arc;
use tauri::State;

#[tauri::command]
pub async fn probe_service(
    widget: State<'_, Arc<ClassifyWidget>>,
) -> Result<ServiceAvailability, AppError> {
    Ok(widget.probe_service().await)
}

#[tauri::command]
pub async fn list_classes(widget: State<'_, Arc<ClassifyWidget>>) -> Result<ClassList, AppError> {
    Ok(widget.client().list_classes().await?)
}

#[tauri::command]
pub async fn service_health(
    widget: State<'_, Arc<ClassifyWidget>>,
) -> Result<HealthStatus, AppError> {
    Ok(widget.client().health().await?)
}
