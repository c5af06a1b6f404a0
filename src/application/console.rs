//! Notification console use case
//!
//! Holds the UI-facing state and turns UI actions into dispatcher and
//! progress controller calls. Subscribers see the latest state through a
//! watch channel.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::domain::config::{AppConfig, DEFAULT_MESSAGE, DEFAULT_TITLE};
use crate::domain::notification::{
    Category, ChannelStatus, ImportanceLevel, NotificationId, ALL_IMPORTANCE_LEVELS,
};

use super::dispatch::{DispatchError, NotificationDispatcher};
use super::ports::NotificationService;
use super::progress::{ProgressController, ProgressEvent, ProgressRun};

/// UI-facing state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleState {
    pub notifications_enabled: bool,
    pub selected_importance: ImportanceLevel,
    pub selected_category: Option<Category>,
    pub custom_title: String,
    pub custom_message: String,
    pub is_progress_running: bool,
    pub progress_notification_id: Option<NotificationId>,
    pub progress_percent: u32,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            selected_importance: ImportanceLevel::Urgent,
            selected_category: None,
            custom_title: DEFAULT_TITLE.to_string(),
            custom_message: DEFAULT_MESSAGE.to_string(),
            is_progress_running: false,
            progress_notification_id: None,
            progress_percent: 0,
        }
    }
}

impl ConsoleState {
    /// Initial state with title and message taken from config
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            custom_title: config.title_or_default().to_string(),
            custom_message: config.message_or_default().to_string(),
            ..Self::default()
        }
    }
}

/// A channel and its current status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelReport {
    pub importance: &'static str,
    pub channel_id: &'static str,
    pub status: ChannelStatus,
    pub label: &'static str,
}

/// Presentation state holder
pub struct NotificationConsole<S>
where
    S: NotificationService + 'static,
{
    dispatcher: Arc<NotificationDispatcher<S>>,
    progress: ProgressController<S>,
    state: Arc<watch::Sender<ConsoleState>>,
}

impl<S> NotificationConsole<S>
where
    S: NotificationService + 'static,
{
    /// Create a console and poll the enabled state once
    pub async fn new(
        dispatcher: Arc<NotificationDispatcher<S>>,
        initial: ConsoleState,
        progress_interval: Duration,
    ) -> Self {
        let (tx, _rx) = watch::channel(initial);
        let state = Arc::new(tx);

        let sink = Arc::clone(&state);
        let progress = ProgressController::new(Arc::clone(&dispatcher))
            .with_interval(progress_interval)
            .with_observer(Arc::new(move |event| apply_progress_event(&sink, event)));

        let console = Self {
            dispatcher,
            progress,
            state,
        };
        console.check_notification_status().await;
        console
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ConsoleState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<ConsoleState> {
        self.state.subscribe()
    }

    pub fn dispatcher(&self) -> &NotificationDispatcher<S> {
        &self.dispatcher
    }

    pub async fn check_notification_status(&self) -> bool {
        let enabled = self.dispatcher.notifications_enabled().await;
        self.state
            .send_if_modified(|s| replace(&mut s.notifications_enabled, enabled));
        enabled
    }

    pub fn select_importance(&self, importance: ImportanceLevel) {
        self.state
            .send_if_modified(|s| replace(&mut s.selected_importance, importance));
    }

    pub fn select_category(&self, category: Option<Category>) {
        self.state
            .send_if_modified(|s| replace(&mut s.selected_category, category));
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.state
            .send_if_modified(|s| replace(&mut s.custom_title, title));
    }

    pub fn set_message(&self, message: impl Into<String>) {
        let message = message.into();
        self.state
            .send_if_modified(|s| replace(&mut s.custom_message, message));
    }

    /// Post with the selected title, message, importance and category
    pub async fn send_custom(&self) -> Result<NotificationId, DispatchError> {
        let state = self.state();
        self.dispatcher
            .post(
                &state.custom_title,
                &state.custom_message,
                state.selected_importance,
                state.selected_category,
            )
            .await
    }

    /// Post a sample notification on the channel of `importance`
    pub async fn send_by_importance(
        &self,
        importance: ImportanceLevel,
    ) -> Result<NotificationId, DispatchError> {
        self.dispatcher
            .post(
                &format!("{} Notification", importance.display_name()),
                importance.description(),
                importance,
                None,
            )
            .await
    }

    /// Post a sample notification tagged with `category` on the urgent channel
    pub async fn send_by_category(
        &self,
        category: Category,
    ) -> Result<NotificationId, DispatchError> {
        self.dispatcher
            .post(
                &format!("{} Notification", category.display_name()),
                category.description(),
                ImportanceLevel::Urgent,
                Some(category),
            )
            .await
    }

    /// Start the simulated download unless one is running
    pub async fn start_progress(&self) -> Result<Option<ProgressRun>, DispatchError> {
        self.progress.start().await
    }

    /// Remove every notification and stop the progress session
    pub async fn cancel_all(&self) {
        // cancel() returns once any step at the host has landed
        self.progress.cancel().await;
        self.dispatcher.cancel_all().await;
        self.state.send_if_modified(|s| {
            let changed = s.is_progress_running || s.progress_notification_id.is_some();
            s.is_progress_running = false;
            s.progress_notification_id = None;
            changed
        });
    }

    /// Status of every importance level's channel
    pub async fn channel_statuses(&self) -> Vec<ChannelReport> {
        let mut reports = Vec::with_capacity(ALL_IMPORTANCE_LEVELS.len());
        for level in ALL_IMPORTANCE_LEVELS {
            let status = self.dispatcher.channel_status(level.channel_id()).await;
            reports.push(ChannelReport {
                importance: level.display_name(),
                channel_id: level.channel_id(),
                status,
                label: status.label(),
            });
        }
        reports
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn apply_progress_event(state: &watch::Sender<ConsoleState>, event: ProgressEvent) {
    state.send_modify(|s| match event {
        ProgressEvent::Started { id } => {
            s.is_progress_running = true;
            s.progress_notification_id = Some(id);
            s.progress_percent = 0;
        }
        ProgressEvent::Advanced { percent, .. } => s.progress_percent = percent,
        ProgressEvent::Completed { .. } => {
            s.is_progress_running = false;
            s.progress_notification_id = None;
            s.progress_percent = 100;
        }
        ProgressEvent::Cancelled { .. } => {
            s.is_progress_running = false;
            s.progress_notification_id = None;
        }
    });
}
