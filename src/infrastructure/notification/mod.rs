//! Notification infrastructure module
//!
//! Provides notification hosts: notify-rust (primary), the notify-send
//! tool, and an in-memory host for dry runs and tests.

mod desktop;
mod handles;
mod memory;
mod notify_send;
mod registry;

pub use desktop::DesktopNotificationService;
pub use memory::InMemoryNotificationService;
pub use notify_send::NotifySendService;
pub use registry::ChannelRegistry;

use std::fmt;
use std::str::FromStr;

use crate::application::ports::NotificationService;
use crate::domain::config::AppConfig;

/// Available notification backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationBackend {
    /// notify-rust (cross-platform)
    #[default]
    Desktop,
    /// notify-send command-line tool
    NotifySend,
    /// Nothing is shown; calls are recorded in memory
    Memory,
}

/// Valid backend names
pub const VALID_BACKENDS: &[&str] = &["desktop", "notify-send", "memory"];

/// Error type for parsing a backend name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBackendError {
    pub input: String,
}

impl fmt::Display for ParseBackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid backend: \"{}\". Valid backends are: {}",
            self.input,
            VALID_BACKENDS.join(", ")
        )
    }
}

impl std::error::Error for ParseBackendError {}

impl FromStr for NotificationBackend {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "notify-send" => Ok(Self::NotifySend),
            "memory" => Ok(Self::Memory),
            _ => Err(ParseBackendError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for NotificationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Desktop => write!(f, "desktop"),
            Self::NotifySend => write!(f, "notify-send"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Create the notification host selected by `config`
pub fn create_notification_service(
    config: &AppConfig,
) -> Result<Box<dyn NotificationService>, ParseBackendError> {
    let backend: NotificationBackend = config.backend_or_default().parse()?;
    let app_name = config.app_name_or_default();
    let enabled = config.enabled_or_default();
    let blocked = config.blocked_channels_or_default().to_vec();

    log::debug!("using {} notification backend", backend);
    let service: Box<dyn NotificationService> = match backend {
        NotificationBackend::Desktop => Box::new(
            DesktopNotificationService::with_app_name(app_name)
                .with_user_settings(enabled, blocked),
        ),
        NotificationBackend::NotifySend => Box::new(
            NotifySendService::with_app_name(app_name).with_user_settings(enabled, blocked),
        ),
        NotificationBackend::Memory => {
            let service = InMemoryNotificationService::new();
            service.set_enabled(enabled);
            for channel_id in &blocked {
                service.block_channel(channel_id);
            }
            Box::new(service)
        }
    };
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_backends() {
        assert_eq!("desktop".parse(), Ok(NotificationBackend::Desktop));
        assert_eq!("Notify-Send".parse(), Ok(NotificationBackend::NotifySend));
        assert_eq!("memory".parse(), Ok(NotificationBackend::Memory));
        assert!("dbus".parse::<NotificationBackend>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for name in VALID_BACKENDS {
            let backend: NotificationBackend = name.parse().unwrap();
            assert_eq!(backend.to_string(), *name);
        }
    }

    #[tokio::test]
    async fn factory_honors_enabled_switch() {
        let config = AppConfig {
            backend: Some("memory".to_string()),
            enabled: Some(false),
            ..Default::default()
        };
        let service = create_notification_service(&config).unwrap();
        assert!(!service.is_enabled().await);
    }

    #[test]
    fn factory_rejects_unknown_backend() {
        let config = AppConfig {
            backend: Some("pager".to_string()),
            ..Default::default()
        };
        let err = create_notification_service(&config).err().unwrap();
        assert!(err.to_string().contains("pager"));
    }
}
