use crate::error::AppError;
use atc_widget::{ClassificationResult, ClassifyWidget, SelectedFile, WidgetSnapshot};
use log::info;
use std::path::Path;
use std::sync::Arc;
use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;
use tokio::sync::oneshot;

/// Extensions offered by the native file picker.
const PICKER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif", "tif", "tiff"];

#[tauri::command]
pub fn get_widget_state(widget: State<'_, Arc<ClassifyWidget>>) -> WidgetSnapshot {
    widget.snapshot()
}

#[tauri::command]
pub async fn select_file(
    widget: State<'_, Arc<ClassifyWidget>>,
    path: String,
) -> Result<ClassificationResult, AppError> {
    Ok(widget.select_path(Path::new(&path)).await?)
}

/// Drag-drop path: the webview hands over the bytes and the browser's MIME type.
#[tauri::command]
pub async fn select_file_bytes(
    widget: State<'_, Arc<ClassifyWidget>>,
    name: String,
    mime: String,
    bytes: Vec<u8>,
) -> Result<ClassificationResult, AppError> {
    let file = SelectedFile::from_bytes(name, mime, bytes)?;
    Ok(widget.select_file(file).await?)
}

/// Opens the native picker and classifies the chosen image. `None` when the
/// user dismisses the dialog.
#[tauri::command]
pub async fn pick_and_classify(
    app: AppHandle,
    widget: State<'_, Arc<ClassifyWidget>>,
) -> Result<Option<ClassificationResult>, AppError> {
    let (tx, rx) = oneshot::channel();
    app.dialog()
        .file()
        .add_filter("Images", PICKER_EXTENSIONS)
        .pick_file(move |picked| {
            let _ = tx.send(picked);
        });

    let picked = rx
        .await
        .map_err(|e| AppError::from(format!("File dialog closed unexpectedly: {}", e)))?;
    let Some(picked) = picked else {
        info!("File picker dismissed");
        return Ok(None);
    };

    let path = picked.into_path()?;
    Ok(Some(widget.select_path(&path).await?))
}

#[tauri::command]
pub async fn retry_classification(
    widget: State<'_, Arc<ClassifyWidget>>,
) -> Result<ClassificationResult, AppError> {
    Ok(widget.retry().await?)
}

#[tauri::command]
pub fn reset_widget(widget: State<'_, Arc<ClassifyWidget>>) -> WidgetSnapshot {
    widget.reset();
    widget.snapshot()
}
