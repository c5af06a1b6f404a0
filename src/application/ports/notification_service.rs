//! Notification service port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notification::{ChannelSpec, NotificationContent, NotificationId};

/// Errors reported by a host notification service
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Notification backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Failed to show notification: {0}")]
    SendFailed(String),

    #[error("Failed to close notification: {0}")]
    CloseFailed(String),
}

/// Port for the host notification service.
///
/// Hosts own channel policy, permission gating and the live tray.
/// Re-registering a channel never changes the severity of an existing one.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Register channels. Existing channels keep their original severity.
    async fn create_channels(&self, channels: &[ChannelSpec]) -> Result<(), NotificationError>;

    /// Show or replace the notification with the given id.
    ///
    /// # Arguments
    /// * `id` - Caller-allocated identifier; posting an existing id replaces it
    /// * `content` - What to display and on which channel
    async fn notify(
        &self,
        id: NotificationId,
        content: &NotificationContent,
    ) -> Result<(), NotificationError>;

    /// Remove one live notification. Unknown ids are ignored.
    async fn cancel(&self, id: NotificationId) -> Result<(), NotificationError>;

    /// Remove every live notification
    async fn cancel_all(&self) -> Result<(), NotificationError>;

    /// Whether the user allows this application to show notifications
    async fn is_enabled(&self) -> bool;

    /// Current registration of a channel, as possibly modified by the user
    async fn get_channel(&self, channel_id: &str) -> Option<ChannelSpec>;
}

/// Blanket implementation for boxed service types
#[async_trait]
impl NotificationService for Box<dyn NotificationService> {
    async fn create_channels(&self, channels: &[ChannelSpec]) -> Result<(), NotificationError> {
        self.as_ref().create_channels(channels).await
    }

    async fn notify(
        &self,
        id: NotificationId,
        content: &NotificationContent,
    ) -> Result<(), NotificationError> {
        self.as_ref().notify(id, content).await
    }

    async fn cancel(&self, id: NotificationId) -> Result<(), NotificationError> {
        self.as_ref().cancel(id).await
    }

    async fn cancel_all(&self) -> Result<(), NotificationError> {
        self.as_ref().cancel_all().await
    }

    async fn is_enabled(&self) -> bool {
        self.as_ref().is_enabled().await
    }

    async fn get_channel(&self, channel_id: &str) -> Option<ChannelSpec> {
        self.as_ref().get_channel(channel_id).await
    }
}
