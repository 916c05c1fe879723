use crate::domain::ports::Browser;
use std::sync::{Arc, Mutex};

/// 只寫日誌的 Browser，CLI 使用
#[derive(Debug, Clone, Default)]
pub struct LoggingBrowser;

impl Browser for LoggingBrowser {
    fn navigate(&self, location: &str) {
        tracing::info!("➡️  Navigating to {}", location);
    }

    fn show_error(&self, message: &str) {
        tracing::warn!("⚠️  {}", message);
    }
}

/// 記錄導向與錯誤訊息。clone 出來的實例共用同一份紀錄。
#[derive(Debug, Clone, Default)]
pub struct RecordingBrowser {
    navigations: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn last_location(&self) -> Option<String> {
        self.navigations().pop()
    }
}

impl Browser for RecordingBrowser {
    fn navigate(&self, location: &str) {
        if let Ok(mut navigations) = self.navigations.lock() {
            navigations.push(location.to_string());
        }
    }

    fn show_error(&self, message: &str) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.push(message.to_string());
        }
    }
}
