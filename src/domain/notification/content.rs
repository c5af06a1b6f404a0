//! Notification identity and content

use std::fmt;

use serde::Serialize;

use super::channel::{ChannelSpec, DEFAULT_VIBRATION_PATTERN, LIGHT_COLOR_RED};
use super::importance::{AlertDefaults, Priority};

/// Progress maximum used when callers do not pass one
pub const DEFAULT_PROGRESS_MAX: u32 = 100;

/// Identifier of a posted notification, unique within a dispatcher's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NotificationId(u32);

impl NotificationId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Determinate progress bar state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressIndicator {
    pub current: u32,
    pub max: u32,
}

impl ProgressIndicator {
    pub const fn new(current: u32, max: u32) -> Self {
        Self { current, max }
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.max
    }

    /// Completion in whole percent, clamped to 100
    pub fn percent(&self) -> u32 {
        if self.max == 0 {
            return 100;
        }
        (u64::from(self.current) * 100 / u64::from(self.max)).min(100) as u32
    }
}

/// Everything the host needs to display a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub channel_id: String,
    pub category: Option<&'static str>,
    pub priority: Priority,
    pub alerts: AlertDefaults,
    /// Cannot be swiped away
    pub ongoing: bool,
    /// Removed once tapped or finished
    pub auto_cancel: bool,
    pub progress: Option<ProgressIndicator>,
    pub expanded_text: Option<String>,
}

impl NotificationContent {
    /// Channel implied by `priority` and `alerts` when the host has no
    /// registration for `channel_id`
    pub fn fallback_channel(&self) -> ChannelSpec {
        ChannelSpec {
            id: self.channel_id.clone(),
            display_name: self.channel_id.clone(),
            severity: self.priority.severity(),
            description: String::new(),
            sound: self.alerts.sound,
            vibration: self.alerts.vibrate.then(|| DEFAULT_VIBRATION_PATTERN.to_vec()),
            light_color: self.alerts.lights.then_some(LIGHT_COLOR_RED),
        }
    }

    /// Completed progress that the host dismisses on its own
    pub fn is_finished(&self) -> bool {
        self.auto_cancel && self.progress.is_some_and(|p| p.is_complete())
    }
}
