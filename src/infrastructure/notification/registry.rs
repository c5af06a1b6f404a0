//! Channel registry for hosts without native channels
//!
//! Freedesktop servers know nothing about channels, so desktop adapters keep
//! the registrations in process and apply user blocks from config.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::domain::notification::{ChannelSpec, NotificationContent, Severity};

#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: RwLock<HashMap<String, ChannelSpec>>,
    blocked: HashSet<String>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry where the listed channel ids are blocked by the user
    pub fn with_blocked<I, T>(blocked: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            channels: RwLock::new(HashMap::new()),
            blocked: blocked.into_iter().map(Into::into).collect(),
        }
    }

    /// Add channels; the first registration of an id wins
    pub fn register(&self, channels: &[ChannelSpec]) {
        let mut map = self
            .channels
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for channel in channels {
            map.entry(channel.id.clone())
                .or_insert_with(|| channel.clone());
        }
    }

    /// Registration with user blocks applied
    pub fn get(&self, channel_id: &str) -> Option<ChannelSpec> {
        let map = self
            .channels
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.get(channel_id).cloned().map(|mut channel| {
            if self.blocked.contains(channel_id) {
                channel.severity = Severity::None;
            }
            channel
        })
    }

    /// Channel to deliver `content` on, or `None` if it must be dropped.
    ///
    /// An unregistered channel falls back to the content's priority and
    /// alert defaults.
    pub fn deliverable(&self, content: &NotificationContent) -> Option<ChannelSpec> {
        if self.blocked.contains(&content.channel_id) {
            return None;
        }
        let channel = self.get(&content.channel_id).unwrap_or_else(|| {
            log::debug!("channel {} not registered, using priority", content.channel_id);
            content.fallback_channel()
        });
        (channel.severity != Severity::None).then_some(channel)
    }
}
