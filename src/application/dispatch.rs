//! Notification dispatch use case
//!
//! The dispatcher owns the channel set and identifier allocation. It keeps no
//! record of what it posted: the host's tray is the only state.

use std::sync::atomic::{AtomicU32, Ordering};

use thiserror::Error;

use crate::domain::notification::{
    Category, ChannelSpec, ChannelStatus, ImportanceLevel, NotificationContent, NotificationId,
    ProgressIndicator, ALL_IMPORTANCE_LEVELS,
};

use super::ports::NotificationService;

/// Errors from the dispatcher
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("Notification identifiers exhausted")]
    IdsExhausted,
}

/// Notification dispatch adapter
pub struct NotificationDispatcher<S>
where
    S: NotificationService,
{
    service: S,
    next_id: AtomicU32,
}

impl<S> NotificationDispatcher<S>
where
    S: NotificationService,
{
    /// Create a dispatcher and register the channel set with the host
    pub async fn new(service: S) -> Self {
        let dispatcher = Self {
            service,
            next_id: AtomicU32::new(1),
        };
        dispatcher.initialize_channels().await;
        dispatcher
    }

    /// Access the underlying host service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Register one channel per importance level.
    ///
    /// Safe to repeat; the host keeps the severity of channels that already exist.
    pub async fn initialize_channels(&self) {
        let channels: Vec<ChannelSpec> = ALL_IMPORTANCE_LEVELS
            .iter()
            .map(ImportanceLevel::channel_spec)
            .collect();

        match self.service.create_channels(&channels).await {
            Ok(()) => log::debug!("registered {} notification channels", channels.len()),
            Err(e) => log::warn!("channel registration failed: {}", e),
        }
    }

    /// Post a notification on the channel of `importance`
    pub async fn post(
        &self,
        title: &str,
        body: &str,
        importance: ImportanceLevel,
        category: Option<Category>,
    ) -> Result<NotificationId, DispatchError> {
        let (priority, alerts) = importance.priority();
        let content = NotificationContent {
            title: title.to_string(),
            body: body.to_string(),
            channel_id: importance.channel_id().to_string(),
            category: category.map(|c| c.tag()),
            priority,
            alerts,
            ongoing: false,
            auto_cancel: true,
            progress: None,
            expanded_text: Some(body.to_string()),
        };

        let id = self.allocate_id()?;
        self.submit(id, &content).await;
        Ok(id)
    }

    /// Post a new progress notification. Always routed to the Medium channel.
    pub async fn post_progress(
        &self,
        title: &str,
        body: &str,
        progress: u32,
        max: u32,
    ) -> Result<NotificationId, DispatchError> {
        let id = self.allocate_id()?;
        self.submit(id, &progress_content(title, body, progress, max))
            .await;
        Ok(id)
    }

    /// Replace the content of a progress notification in place.
    ///
    /// A stale id is not an error; the host simply shows a new notification
    /// or ignores it.
    pub async fn update_progress(
        &self,
        id: NotificationId,
        title: &str,
        body: &str,
        progress: u32,
        max: u32,
    ) {
        self.submit(id, &progress_content(title, body, progress, max))
            .await;
    }

    pub async fn cancel(&self, id: NotificationId) {
        if let Err(e) = self.service.cancel(id).await {
            log::warn!("cancel {} failed: {}", id, e);
        }
    }

    pub async fn cancel_all(&self) {
        if let Err(e) = self.service.cancel_all().await {
            log::warn!("cancel all failed: {}", e);
        }
    }

    /// Whether the user allows notifications at all
    pub async fn notifications_enabled(&self) -> bool {
        self.service.is_enabled().await
    }

    /// Status label for a channel as currently configured on the host
    pub async fn channel_status(&self, channel_id: &str) -> ChannelStatus {
        let severity = self
            .service
            .get_channel(channel_id)
            .await
            .map(|channel| channel.severity);
        ChannelStatus::from_severity(severity)
    }

    fn allocate_id(&self) -> Result<NotificationId, DispatchError> {
        self.next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
            .map(NotificationId::new)
            .map_err(|_| DispatchError::IdsExhausted)
    }

    // Host failures surface only through `notifications_enabled`, never here.
    async fn submit(&self, id: NotificationId, content: &NotificationContent) {
        match self.service.notify(id, content).await {
            Ok(()) => log::debug!("posted {} on {}", id, content.channel_id),
            Err(e) => log::warn!("notification {} not shown: {}", id, e),
        }
    }
}

/// Build progress content; ongoing while incomplete, auto-cancel once complete
pub fn progress_content(title: &str, body: &str, progress: u32, max: u32) -> NotificationContent {
    let medium = ImportanceLevel::Medium;
    let indicator = ProgressIndicator::new(progress, max);
    let (priority, alerts) = medium.priority();
    NotificationContent {
        title: title.to_string(),
        body: body.to_string(),
        channel_id: medium.channel_id().to_string(),
        category: Some(Category::Progress.tag()),
        priority,
        alerts,
        ongoing: !indicator.is_complete(),
        auto_cancel: indicator.is_complete(),
        progress: Some(indicator),
        expanded_text: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::{Priority, Severity, DEFAULT_PROGRESS_MAX};
    use crate::infrastructure::InMemoryNotificationService;

    async fn dispatcher() -> NotificationDispatcher<InMemoryNotificationService> {
        NotificationDispatcher::new(InMemoryNotificationService::new()).await
    }

    #[tokio::test]
    async fn channels_registered_on_construction() {
        let dispatcher = dispatcher().await;
        for level in ALL_IMPORTANCE_LEVELS {
            let channel = dispatcher
                .service()
                .get_channel(level.channel_id())
                .await
                .unwrap();
            assert_eq!(channel.severity, level.severity());
        }
    }

    #[tokio::test]
    async fn channel_status_matches_level() {
        let dispatcher = dispatcher().await;
        assert_eq!(
            dispatcher.channel_status("channel_urgent").await.label(),
            "Urgent (Sound + Heads-up)"
        );
        assert_eq!(
            dispatcher.channel_status("channel_high").await.label(),
            "High (Sound)"
        );
        assert_eq!(
            dispatcher.channel_status("channel_medium").await.label(),
            "Medium (Silent)"
        );
        assert_eq!(
            dispatcher.channel_status("channel_low").await.label(),
            "Low (Silent)"
        );
        assert_eq!(
            dispatcher.channel_status("channel_missing").await,
            ChannelStatus::Unknown
        );
    }

    #[tokio::test]
    async fn ids_strictly_increase_from_one() {
        let dispatcher = dispatcher().await;
        let a = dispatcher
            .post("a", "a", ImportanceLevel::Low, None)
            .await
            .unwrap();
        let b = dispatcher
            .post_progress("b", "0%", 0, DEFAULT_PROGRESS_MAX)
            .await
            .unwrap();
        let c = dispatcher
            .post("c", "c", ImportanceLevel::High, Some(Category::Call))
            .await
            .unwrap();
        assert_eq!(a, NotificationId::new(1));
        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn post_routes_by_importance_and_tags_category() {
        let dispatcher = dispatcher().await;
        let id = dispatcher
            .post("Hi", "Body", ImportanceLevel::High, Some(Category::Message))
            .await
            .unwrap();

        let posted = dispatcher.service().last_posted(id).unwrap();
        assert_eq!(posted.channel_id, "channel_high");
        assert_eq!(posted.category, Some("msg"));
        assert_eq!(posted.priority, Priority::Default);
        assert!(posted.alerts.sound && posted.alerts.vibrate && !posted.alerts.lights);
        assert!(posted.auto_cancel);
        assert!(!posted.ongoing);
        assert_eq!(posted.expanded_text.as_deref(), Some("Body"));
    }

    #[tokio::test]
    async fn progress_always_uses_medium_channel() {
        let dispatcher = dispatcher().await;
        let id = dispatcher.post_progress("t", "0%", 0, 100).await.unwrap();
        let posted = dispatcher.service().last_posted(id).unwrap();
        assert_eq!(posted.channel_id, "channel_medium");
        assert_eq!(posted.category, Some("progress"));
    }

    #[tokio::test]
    async fn completion_flags_follow_progress() {
        let dispatcher = dispatcher().await;
        let id = dispatcher.post_progress("t", "0%", 0, 100).await.unwrap();

        for progress in [0, 1, 50, 99] {
            dispatcher.update_progress(id, "t", "", progress, 100).await;
            let posted = dispatcher.service().last_posted(id).unwrap();
            assert!(posted.ongoing, "progress {progress}");
            assert!(!posted.auto_cancel, "progress {progress}");
        }

        dispatcher.update_progress(id, "t", "", 100, 100).await;
        let posted = dispatcher.service().last_posted(id).unwrap();
        assert!(!posted.ongoing);
        assert!(posted.auto_cancel);
    }

    #[tokio::test]
    async fn update_of_stale_id_is_accepted() {
        let dispatcher = dispatcher().await;
        dispatcher
            .update_progress(NotificationId::new(42), "t", "", 10, 100)
            .await;
        dispatcher.cancel(NotificationId::new(42)).await;
    }

    #[tokio::test]
    async fn reinitializing_keeps_user_blocked_channel() {
        let dispatcher = dispatcher().await;
        dispatcher.service().block_channel("channel_high");
        dispatcher.initialize_channels().await;

        let channel = dispatcher.service().get_channel("channel_high").await.unwrap();
        assert_eq!(channel.severity, Severity::None);
        assert_eq!(
            dispatcher.channel_status("channel_high").await,
            ChannelStatus::Blocked
        );
    }

    #[tokio::test]
    async fn disabled_host_still_returns_ids() {
        let dispatcher = dispatcher().await;
        dispatcher.service().set_enabled(false);

        assert!(!dispatcher.notifications_enabled().await);
        let id = dispatcher
            .post("t", "b", ImportanceLevel::Urgent, None)
            .await
            .unwrap();
        assert_eq!(id, NotificationId::new(1));
        assert!(dispatcher.service().live_ids().is_empty());
    }

    #[tokio::test]
    async fn cancel_removes_live_notifications() {
        let dispatcher = dispatcher().await;
        let a = dispatcher.post("a", "", ImportanceLevel::Low, None).await.unwrap();
        let b = dispatcher.post("b", "", ImportanceLevel::Low, None).await.unwrap();

        dispatcher.cancel(a).await;
        assert_eq!(dispatcher.service().live_ids(), vec![b]);

        dispatcher.cancel_all().await;
        assert!(dispatcher.service().live_ids().is_empty());
    }

    #[tokio::test]
    async fn exhausted_counter_is_reported() {
        let dispatcher = dispatcher().await;
        dispatcher.next_id.store(u32::MAX, Ordering::SeqCst);
        let err = dispatcher
            .post("t", "b", ImportanceLevel::Low, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::IdsExhausted));
    }
}
