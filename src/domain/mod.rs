//! Domain layer - Core business logic
//!
//! Contains the notification taxonomy, platform value objects,
//! the progress session state machine and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod notification;
pub mod progress;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use notification::{
    Category, ChannelSpec, ChannelStatus, ImportanceLevel, NotificationContent, NotificationId,
    ProgressIndicator, Severity,
};
pub use progress::{ProgressSession, ProgressState};
