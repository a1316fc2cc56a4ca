use atc_widget::{Notification, WidgetObserver, WidgetSnapshot};
use log::warn;
use tauri::{AppHandle, Emitter};

pub const NOTIFICATION_EVENT: &str = "widget-notification";
pub const STATE_EVENT: &str = "widget-state";

/// Forwards widget output to the webview as Tauri events.
pub struct EventBridge {
    app: AppHandle,
}

impl EventBridge {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl WidgetObserver for EventBridge {
    fn notify(&self, notification: &Notification) {
        if let Err(e) = self.app.emit(NOTIFICATION_EVENT, notification) {
            warn!("Failed to emit {}: {}", NOTIFICATION_EVENT, e);
        }
    }

    fn state_changed(&self, snapshot: &WidgetSnapshot) {
        if let Err(e) = self.app.emit(STATE_EVENT, snapshot) {
            warn!("Failed to emit {}: {}", STATE_EVENT, e);
        }
    }
}
