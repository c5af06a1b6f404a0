//! notify-send notification adapter

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{NotificationError, NotificationService};
use crate::domain::notification::{ChannelSpec, NotificationContent, NotificationId, Severity};

use super::handles::HandleMap;
use super::registry::ChannelRegistry;

/// notify-send notification adapter.
///
/// The tool cannot close notifications, so `cancel` only forgets the
/// server-assigned id.
pub struct NotifySendService {
    /// Application name for notifications
    app_name: String,
    enabled: bool,
    registry: ChannelRegistry,
    server_ids: HandleMap<u32>,
}

impl NotifySendService {
    pub fn new() -> Self {
        Self::with_app_name("notify-lab")
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            enabled: true,
            registry: ChannelRegistry::new(),
            server_ids: HandleMap::new(),
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

    /// Command-line arguments for one notification
    fn args(
        &self,
        channel: &ChannelSpec,
        content: &NotificationContent,
        replace_id: Option<u32>,
    ) -> Vec<String> {
        let urgency = match channel.severity {
            Severity::High => "critical",
            Severity::Default => "normal",
            Severity::Low | Severity::Min | Severity::None => "low",
        };

        let mut args = vec![
            "--app-name".to_string(),
            self.app_name.clone(),
            "--urgency".to_string(),
            urgency.to_string(),
            "--print-id".to_string(),
        ];
        if let Some(tag) = content.category {
            args.push("--category".to_string());
            args.push(tag.to_string());
        }
        if let Some(progress) = content.progress {
            args.push("--hint".to_string());
            args.push(format!("int:value:{}", progress.percent()));
        }
        if !channel.sound {
            args.push("--hint".to_string());
            args.push("boolean:suppress-sound:true".to_string());
        }
        if content.ongoing {
            args.push("--hint".to_string());
            args.push("boolean:resident:true".to_string());
            args.push("--expire-time".to_string());
            args.push("0".to_string());
        } else if content.auto_cancel {
            args.push("--transient".to_string());
        }
        if let Some(id) = replace_id {
            args.push("--replace-id".to_string());
            args.push(id.to_string());
        }
        // User text never parses as an option
        args.push("--".to_string());
        args.push(content.title.clone());
        args.push(
            content
                .expanded_text
                .clone()
                .unwrap_or_else(|| content.body.clone()),
        );
        args
    }
}

impl Default for NotifySendService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationService for NotifySendService {
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

        let replace_id = self.server_ids.lookup(id, |server_id| *server_id);
        let output = Command::new("notify-send")
            .args(self.args(&channel, content, replace_id))
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotificationError::BackendUnavailable("notify-send not found".to_string())
                } else {
                    NotificationError::SendFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            return Err(NotificationError::SendFailed(format!(
                "notify-send exited with status: {}",
                output.status
            )));
        }

        match String::from_utf8_lossy(&output.stdout).trim().parse::<u32>() {
            Ok(server_id) => self.server_ids.record(id, server_id, content.is_finished()),
            Err(_) if content.is_finished() => {
                self.server_ids.remove(id);
            }
            Err(_) => {}
        }

        Ok(())
    }

    async fn cancel(&self, id: NotificationId) -> Result<(), NotificationError> {
        if self.server_ids.remove(id).is_some() {
            log::debug!("notify-send cannot close {}, forgetting it", id);
        }
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), NotificationError> {
        self.server_ids.drain();
        Ok(())
    }

    async fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn get_channel(&self, channel_id: &str) -> Option<ChannelSpec> {
        self.registry.get(channel_id)
    }
}
