//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces:
//! notification hosts and the config file store.

pub mod config;
pub mod notification;

// Re-export adapters
pub use config::XdgConfigStore;
pub use notification::{
    create_notification_service, DesktopNotificationService, InMemoryNotificationService,
    NotificationBackend, NotifySendService,
};
