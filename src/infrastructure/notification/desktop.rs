//! Cross-platform notification adapter using notify-rust
//!
//! Urgency, hints, in-place replacement and closing are only available on
//! freedesktop hosts; elsewhere notifications are shown as plain toasts.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotificationService};
use crate::domain::notification::{ChannelSpec, NotificationContent, NotificationId};

use super::handles::HandleMap;
use super::registry::ChannelRegistry;

#[cfg(all(unix, not(target_os = "macos")))]
use crate::domain::notification::Severity;

#[cfg(all(unix, not(target_os = "macos")))]
type Handle = notify_rust::NotificationHandle;
#[cfg(not(all(unix, not(target_os = "macos"))))]
type Handle = ();

/// Desktop notification host backed by notify-rust
pub struct DesktopNotificationService {
    /// Application name for notifications
    app_name: String,
    enabled: bool,
    registry: ChannelRegistry,
    handles: Arc<HandleMap<Handle>>,
}

impl DesktopNotificationService {
    pub fn new() -> Self {
        Self::with_app_name("notify-lab")
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            enabled: true,
            registry: ChannelRegistry::new(),
            handles: Arc::new(HandleMap::new()),
        }
    }

    /// Apply the user's global switch and channel blocks
    pub fn with_user_settings<I, T>(mut self, enabled: bool, blocked_channels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.enabled = enabled;
        self.registry = ChannelRegistry::with_blocked(blocked_channels);
        self
    }
}

impl Default for DesktopNotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn urgency_for(severity: Severity) -> notify_rust::Urgency {
    match severity {
        Severity::High => notify_rust::Urgency::Critical,
        Severity::Default => notify_rust::Urgency::Normal,
        Severity::Low | Severity::Min | Severity::None => notify_rust::Urgency::Low,
    }
}

fn build(
    app_name: &str,
    channel: &ChannelSpec,
    content: &NotificationContent,
) -> notify_rust::Notification {
    let mut notification = notify_rust::Notification::new();
    notification
        .appname(app_name)
        .summary(&content.title)
        .body(content.expanded_text.as_deref().unwrap_or(&content.body));

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        use notify_rust::{Hint, Timeout};

        notification.urgency(urgency_for(channel.severity));
        if channel.sound {
            notification.hint(Hint::SoundName("message-new-instant".to_string()));
        } else {
            notification.hint(Hint::SuppressSound(true));
        }
        if let Some(tag) = content.category {
            notification.hint(Hint::Category(tag.to_string()));
        }
        if let Some(progress) = content.progress {
            notification.hint(Hint::CustomInt(
                "value".to_string(),
                progress.percent() as i32,
            ));
        }
        if content.ongoing {
            notification.hint(Hint::Resident(true));
            notification.timeout(Timeout::Never);
        } else if content.auto_cancel {
            notification.hint(Hint::Transient(true));
        }
    }
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    let _ = channel;

    notification
}

#[async_trait]
impl NotificationService for DesktopNotificationService {
    async fn create_channels(&self, channels: &[ChannelSpec]) -> Result<(), NotificationError> {
        self.registry.register(channels);
        Ok(())
    }

    async fn notify(
        &self,
        id: NotificationId,
        content: &NotificationContent,
    ) -> Result<(), NotificationError> {
        if !self.enabled {
            log::debug!("notifications disabled, dropping {}", id);
            return Ok(());
        }
        let Some(channel) = self.registry.deliverable(content) else {
            log::debug!("channel {} blocked, dropping {}", content.channel_id, id);
            return Ok(());
        };

        let notification = build(&self.app_name, &channel, content);
        let handles = Arc::clone(&self.handles);
        let finished = content.is_finished();

        // notify-rust operations can block, so run in spawn_blocking
        tokio::task::spawn_blocking(move || -> Result<(), NotificationError> {
            #[cfg(all(unix, not(target_os = "macos")))]
            {
                let mut notification = notification;
                if let Some(previous) = handles.lookup(id, |handle| handle.id()) {
                    notification.id(previous);
                }
                let handle = notification
                    .show()
                    .map_err(|e| NotificationError::SendFailed(e.to_string()))?;
                handles.record(id, handle, finished);
            }
            #[cfg(not(all(unix, not(target_os = "macos"))))]
            {
                notification
                    .show()
                    .map_err(|e| NotificationError::SendFailed(e.to_string()))?;
                handles.record(id, (), finished);
            }

            Ok(())
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }

    async fn cancel(&self, id: NotificationId) -> Result<(), NotificationError> {
        if let Some(handle) = self.handles.remove(id) {
            close(vec![handle]).await?;
        }
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), NotificationError> {
        close(self.handles.drain()).await
    }

    async fn is_enabled(&self) -> bool {
        if !self.enabled {
            return false;
        }

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            match tokio::task::spawn_blocking(notify_rust::get_server_information).await {
                Ok(Ok(info)) => {
                    log::debug!("notification server: {} {}", info.name, info.version);
                    true
                }
                Ok(Err(e)) => {
                    log::warn!("no notification server: {}", e);
                    false
                }
                Err(e) => {
                    log::warn!("server query failed: {}", e);
                    false
                }
            }
        }
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            true
        }
    }

    async fn get_channel(&self, channel_id: &str) -> Option<ChannelSpec> {
        self.registry.get(channel_id)
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
async fn close(handles: Vec<Handle>) -> Result<(), NotificationError> {
    if handles.is_empty() {
        return Ok(());
    }
    tokio::task::spawn_blocking(move || {
        for handle in handles {
            handle.close();
        }
    })
    .await
    .map_err(|e| NotificationError::CloseFailed(format!("Task join error: {}", e)))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
async fn close(handles: Vec<Handle>) -> Result<(), NotificationError> {
    log::debug!("host cannot close notifications, {} left open", handles.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::{AlertDefaults, ImportanceLevel, Priority, Severity as Sev};

    #[test]
    fn service_with_custom_app_name() {
        let service = DesktopNotificationService::with_app_name("TestApp");
        assert_eq!(service.app_name, "TestApp");
    }

    #[test]
    fn service_default_name() {
        let service = DesktopNotificationService::default();
        assert_eq!(service.app_name, "notify-lab");
        assert!(service.enabled);
    }

    #[tokio::test]
    async fn channels_are_tracked_in_process() {
        let service = DesktopNotificationService::new().with_user_settings(true, ["channel_low"]);
        service
            .create_channels(&[
                ImportanceLevel::Urgent.channel_spec(),
                ImportanceLevel::Low.channel_spec(),
            ])
            .await
            .unwrap();

        let urgent = service.get_channel("channel_urgent").await.unwrap();
        assert_eq!(urgent.severity, Sev::High);
        let low = service.get_channel("channel_low").await.unwrap();
        assert_eq!(low.severity, Sev::None);
    }

    #[tokio::test]
    async fn disabled_service_drops_silently() {
        let service = DesktopNotificationService::new().with_user_settings(false, Vec::<String>::new());
        let content = NotificationContent {
            title: "t".to_string(),
            body: "b".to_string(),
            channel_id: "channel_urgent".to_string(),
            category: None,
            priority: Priority::High,
            alerts: AlertDefaults::default(),
            ongoing: false,
            auto_cancel: true,
            progress: None,
            expanded_text: None,
        };

        assert!(service.notify(NotificationId::new(1), &content).await.is_ok());
        assert!(!service.is_enabled().await);
        assert!(service.cancel_all().await.is_ok());
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn urgency_follows_severity() {
        assert_eq!(urgency_for(Sev::High), notify_rust::Urgency::Critical);
        assert_eq!(urgency_for(Sev::Default), notify_rust::Urgency::Normal);
        assert_eq!(urgency_for(Sev::Min), notify_rust::Urgency::Low);
    }
}
