//! Application configuration value object

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::progress::DEFAULT_STEP_INTERVAL_MS;

pub const DEFAULT_APP_NAME: &str = "notify-lab";
pub const DEFAULT_BACKEND: &str = "desktop";
pub const DEFAULT_TITLE: &str = "Test Notification";
pub const DEFAULT_MESSAGE: &str = "This is a test notification message";

/// Progress session configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Pause between two progress steps
    pub interval_ms: Option<u64>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_name: Option<String>,
    pub backend: Option<String>,
    /// Global opt-out; `false` suppresses delivery like a revoked permission
    pub enabled: Option<bool>,
    /// Channel ids the user has blocked
    pub blocked_channels: Option<Vec<String>>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub progress: Option<ProgressConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            backend: Some(DEFAULT_BACKEND.to_string()),
            enabled: Some(true),
            blocked_channels: Some(Vec::new()),
            title: Some(DEFAULT_TITLE.to_string()),
            message: Some(DEFAULT_MESSAGE.to_string()),
            progress: Some(ProgressConfig {
                interval_ms: Some(DEFAULT_STEP_INTERVAL_MS),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            app_name: other.app_name.or(self.app_name),
            backend: other.backend.or(self.backend),
            enabled: other.enabled.or(self.enabled),
            blocked_channels: other.blocked_channels.or(self.blocked_channels),
            title: other.title.or(self.title),
            message: other.message.or(self.message),
            progress: match (self.progress, other.progress) {
                (Some(b), Some(o)) => Some(ProgressConfig {
                    interval_ms: o.interval_ms.or(b.interval_ms),
                }),
                (b, o) => o.or(b),
            },
        }
    }

    pub fn app_name_or_default(&self) -> &str {
        self.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    pub fn backend_or_default(&self) -> &str {
        self.backend.as_deref().unwrap_or(DEFAULT_BACKEND)
    }

    pub fn enabled_or_default(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn blocked_channels_or_default(&self) -> &[String] {
        self.blocked_channels.as_deref().unwrap_or(&[])
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_MESSAGE)
    }

    /// Pause between progress steps
    pub fn progress_interval_or_default(&self) -> Duration {
        let ms = self
            .progress
            .as_ref()
            .and_then(|p| p.interval_ms)
            .unwrap_or(DEFAULT_STEP_INTERVAL_MS);
        Duration::from_millis(ms)
    }
}
