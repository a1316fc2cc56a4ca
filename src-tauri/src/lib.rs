mod commands;
mod error;
mod services;

use atc_widget::{ClassifierClient, ClassifyWidget, WidgetConfig};
use services::event_bridge::EventBridge;
use std::sync::Arc;
use tauri::Manager;

const CONFIG_FILE: &str = "config.json";

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Reads RUST_LOG; defaults to info.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("ATC breed demo starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .setup(|app| {
            let config = match app.path().app_config_dir() {
                Ok(dir) => WidgetConfig::load(&dir.join(CONFIG_FILE)),
                Err(e) => {
                    log::warn!("No app config directory ({}), using defaults", e);
                    WidgetConfig::default().apply_overrides(|key| std::env::var(key).ok())
                }
            };
            log::info!("Classification service at {}", config.base_url);

            let observer = Arc::new(EventBridge::new(app.handle().clone()));
            let widget = Arc::new(ClassifyWidget::new(ClassifierClient::new(config), observer));
            app.manage(widget.clone());

            // One liveness probe per launch.
            tauri::async_runtime::spawn(async move {
                let availability = widget.activate().await;
                log::info!("Initial service availability: {:?}", availability);
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::classifier::get_widget_state,
            commands::classifier::select_file,
            commands::classifier::select_file_bytes,
            commands::classifier::pick_and_classify,
            commands::classifier::retry_classification,
            commands::classifier::reset_widget,
            commands::service::probe_service,
            commands::service::list_classes,
            commands::service::service_health,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
