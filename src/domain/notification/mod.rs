//! Notification taxonomy and platform value objects

mod category;
mod channel;
mod content;
mod importance;

pub use category::{Category, ALL_CATEGORIES};
pub use channel::{
    ChannelSpec, ChannelStatus, Severity, DEFAULT_VIBRATION_PATTERN, LIGHT_COLOR_RED,
};
pub use content::{NotificationContent, NotificationId, ProgressIndicator, DEFAULT_PROGRESS_MAX};
pub use importance::{
    policy_for, AlertDefaults, ChannelPolicy, ImportanceLevel, Priority, ALL_IMPORTANCE_LEVELS,
};
