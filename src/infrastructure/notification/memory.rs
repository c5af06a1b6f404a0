//! In-memory notification host
//!
//! Behaves like a host notification manager without showing anything:
//! keeps a channel registry, a live tray and a log of every notify call.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotificationService};
use crate::domain::notification::{ChannelSpec, NotificationContent, NotificationId, Severity};

#[derive(Debug, Default)]
struct HostState {
    enabled: bool,
    channels: HashMap<String, ChannelSpec>,
    blocked: HashSet<String>,
    tray: BTreeMap<NotificationId, NotificationContent>,
    history: Vec<(NotificationId, NotificationContent)>,
}

/// Recording notification host
#[derive(Debug)]
pub struct InMemoryNotificationService {
    state: Mutex<HostState>,
}

impl InMemoryNotificationService {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HostState {
                enabled: true,
                ..Default::default()
            }),
        }
    }

    /// Toggle the global permission
    pub fn set_enabled(&self, enabled: bool) {
        self.lock().enabled = enabled;
    }

    /// Block a channel the way a user would from system settings.
    /// Applies to channels created later too.
    pub fn block_channel(&self, channel_id: &str) {
        let mut state = self.lock();
        state.blocked.insert(channel_id.to_string());
        if let Some(channel) = state.channels.get_mut(channel_id) {
            channel.severity = Severity::None;
        }
    }

    /// Ids currently visible in the tray, ascending
    pub fn live_ids(&self) -> Vec<NotificationId> {
        self.lock().tray.keys().copied().collect()
    }

    /// Content of the most recent notify call for `id`
    pub fn last_posted(&self, id: NotificationId) -> Option<NotificationContent> {
        self.lock()
            .history
            .iter()
            .rev()
            .find(|(posted, _)| *posted == id)
            .map(|(_, content)| content.clone())
    }

    /// Every notify call for `id`, oldest first
    pub fn posted_for(&self, id: NotificationId) -> Vec<NotificationContent> {
        self.lock()
            .history
            .iter()
            .filter(|(posted, _)| *posted == id)
            .map(|(_, content)| content.clone())
            .collect()
    }

    /// Total number of notify calls
    pub fn notify_count(&self) -> usize {
        self.lock().history.len()
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        // A panic while holding the lock leaves plain data behind; keep going.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryNotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationService for InMemoryNotificationService {
    async fn create_channels(&self, channels: &[ChannelSpec]) -> Result<(), NotificationError> {
        let mut state = self.lock();
        for channel in channels {
            match state.channels.get_mut(&channel.id) {
                // Severity is fixed once created; only labels follow the caller.
                Some(existing) => {
                    existing.display_name = channel.display_name.clone();
                    existing.description = channel.description.clone();
                }
                None => {
                    let mut created = channel.clone();
                    if state.blocked.contains(&created.id) {
                        created.severity = Severity::None;
                    }
                    state.channels.insert(created.id.clone(), created);
                }
            }
        }
        Ok(())
    }

    async fn notify(
        &self,
        id: NotificationId,
        content: &NotificationContent,
    ) -> Result<(), NotificationError> {
        let mut state = self.lock();
        state.history.push((id, content.clone()));

        let blocked = state
            .channels
            .get(&content.channel_id)
            .map_or(true, |c| c.severity == Severity::None);
        if state.enabled && !blocked {
            state.tray.insert(id, content.clone());
        }
        Ok(())
    }

    async fn cancel(&self, id: NotificationId) -> Result<(), NotificationError> {
        self.lock().tray.remove(&id);
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), NotificationError> {
        self.lock().tray.clear();
        Ok(())
    }

    async fn is_enabled(&self) -> bool {
        self.lock().enabled
    }

    async fn get_channel(&self, channel_id: &str) -> Option<ChannelSpec> {
        self.lock().channels.get(channel_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::{AlertDefaults, ImportanceLevel, Priority};

    fn content(channel: &str) -> NotificationContent {
        NotificationContent {
            title: "t".to_string(),
            body: "b".to_string(),
            channel_id: channel.to_string(),
            category: None,
            priority: Priority::Default,
            alerts: AlertDefaults::default(),
            ongoing: false,
            auto_cancel: true,
            progress: None,
            expanded_text: None,
        }
    }

    #[tokio::test]
    async fn existing_channel_keeps_severity() {
        let host = InMemoryNotificationService::new();
        let mut channel = ImportanceLevel::High.channel_spec();
        host.create_channels(&[channel.clone()]).await.unwrap();

        channel.severity = Severity::High;
        channel.description = "changed".to_string();
        host.create_channels(&[channel]).await.unwrap();

        let stored = host.get_channel("channel_high").await.unwrap();
        assert_eq!(stored.severity, Severity::Default);
        assert_eq!(stored.description, "changed");
    }

    #[tokio::test]
    async fn block_before_creation_sticks() {
        let host = InMemoryNotificationService::new();
        host.block_channel("channel_low");
        host.create_channels(&[ImportanceLevel::Low.channel_spec()])
            .await
            .unwrap();
        let stored = host.get_channel("channel_low").await.unwrap();
        assert_eq!(stored.severity, Severity::None);
    }

    #[tokio::test]
    async fn unknown_channel_is_not_shown() {
        let host = InMemoryNotificationService::new();
        host.notify(NotificationId::new(1), &content("nowhere"))
            .await
            .unwrap();
        assert!(host.live_ids().is_empty());
        assert_eq!(host.notify_count(), 1);
    }

    #[tokio::test]
    async fn notify_replaces_same_id() {
        let host = InMemoryNotificationService::new();
        host.create_channels(&[ImportanceLevel::Low.channel_spec()])
            .await
            .unwrap();
        let id = NotificationId::new(1);
        host.notify(id, &content("channel_low")).await.unwrap();
        let mut second = content("channel_low");
        second.title = "second".to_string();
        host.notify(id, &second).await.unwrap();

        assert_eq!(host.live_ids(), vec![id]);
        assert_eq!(host.last_posted(id).unwrap().title, "second");
        assert_eq!(host.posted_for(id).len(), 2);
    }
}
