//! Progress session use case
//!
//! Drives one simulated download from 0% to 100%, updating a single
//! notification in place. Only one session runs at a time.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domain::notification::{NotificationId, DEFAULT_PROGRESS_MAX};
use crate::domain::progress::{
    progress_steps, ProgressSession, ProgressState, ProgressStep, DEFAULT_STEP_INTERVAL_MS,
};

use super::dispatch::{DispatchError, NotificationDispatcher};
use super::ports::NotificationService;

/// Progress lifecycle events reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { id: NotificationId },
    Advanced { id: NotificationId, percent: u32 },
    Completed { id: NotificationId },
    Cancelled { id: NotificationId },
}

/// Callback invoked for every progress event
pub type ProgressObserver = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressOutcome {
    Completed,
    Cancelled,
}

/// A session accepted by [`ProgressController::start`]
#[derive(Debug)]
pub struct ProgressRun {
    pub id: NotificationId,
    pub handle: JoinHandle<ProgressOutcome>,
}

impl ProgressRun {
    /// Wait for the session to finish
    pub async fn wait(self) -> ProgressOutcome {
        self.handle.await.unwrap_or(ProgressOutcome::Cancelled)
    }
}

#[derive(Default)]
struct SessionSlot {
    session: ProgressSession,
    token: Option<CancellationToken>,
}

/// Single-flight progress session controller
pub struct ProgressController<S>
where
    S: NotificationService + 'static,
{
    dispatcher: Arc<NotificationDispatcher<S>>,
    slot: Arc<Mutex<SessionSlot>>,
    interval: Duration,
    observer: Option<ProgressObserver>,
}

impl<S> ProgressController<S>
where
    S: NotificationService + 'static,
{
    pub fn new(dispatcher: Arc<NotificationDispatcher<S>>) -> Self {
        Self {
            dispatcher,
            slot: Arc::new(Mutex::new(SessionSlot::default())),
            interval: Duration::from_millis(DEFAULT_STEP_INTERVAL_MS),
            observer: None,
        }
    }

    /// Set the pause between two steps
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_observer(mut self, observer: ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub async fn state(&self) -> ProgressState {
        self.slot.lock().await.session.state()
    }

    pub async fn is_running(&self) -> bool {
        self.slot.lock().await.session.is_running()
    }

    /// Id of the notification owned by the running session
    pub async fn notification_id(&self) -> Option<NotificationId> {
        self.slot.lock().await.session.notification_id()
    }

    /// Start a session unless one is already running.
    ///
    /// Returns `Ok(None)` when a session is active; the request is dropped,
    /// not queued.
    pub async fn start(&self) -> Result<Option<ProgressRun>, DispatchError> {
        let mut slot = self.slot.lock().await;
        if slot.session.is_running() {
            log::debug!("progress session already running, ignoring start");
            return Ok(None);
        }

        let initial = ProgressStep::initial();
        let id = self
            .dispatcher
            .post_progress(
                initial.title,
                &initial.body,
                initial.percent,
                DEFAULT_PROGRESS_MAX,
            )
            .await?;

        // Cannot fail: checked above while holding the lock
        if let Err(e) = slot.session.start(id) {
            log::warn!("{}", e);
            return Ok(None);
        }
        let token = CancellationToken::new();
        slot.token = Some(token.clone());
        drop(slot);

        log::info!("progress session started on {}", id);
        self.emit(ProgressEvent::Started { id });

        let handle = tokio::spawn(run_steps(
            Arc::clone(&self.dispatcher),
            Arc::clone(&self.slot),
            token,
            id,
            self.interval,
            self.observer.clone(),
        ));

        Ok(Some(ProgressRun { id, handle }))
    }

    /// Return to idle. The running loop stops at its next step boundary.
    ///
    /// Does not remove the notification; pair with
    /// [`NotificationDispatcher::cancel_all`] for that.
    pub async fn cancel(&self) -> Option<NotificationId> {
        let mut slot = self.slot.lock().await;
        if let Some(token) = slot.token.take() {
            token.cancel();
        }
        let released = slot.session.cancel();
        drop(slot);

        if let Some(id) = released {
            log::info!("progress session on {} cancelled", id);
            self.emit(ProgressEvent::Cancelled { id });
        }
        released
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(observer) = &self.observer {
            observer(event);
        }
    }
}

async fn run_steps<S>(
    dispatcher: Arc<NotificationDispatcher<S>>,
    slot: Arc<Mutex<SessionSlot>>,
    token: CancellationToken,
    id: NotificationId,
    interval: Duration,
    observer: Option<ProgressObserver>,
) -> ProgressOutcome
where
    S: NotificationService + 'static,
{
    let emit = |event: ProgressEvent| {
        if let Some(observer) = &observer {
            observer(event);
        }
    };

    for step in progress_steps() {
        tokio::select! {
            _ = token.cancelled() => return ProgressOutcome::Cancelled,
            _ = tokio::time::sleep(interval) => {}
        }

        // The guard spans the host call so cancel() waits for a step in flight.
        let mut guard = slot.lock().await;
        if token.is_cancelled() {
            return ProgressOutcome::Cancelled;
        }
        if let Err(e) = guard.session.advance(step.percent) {
            log::warn!("{}", e);
            return ProgressOutcome::Cancelled;
        }
        let percent = guard.session.progress();

        dispatcher
            .update_progress(id, step.title, &step.body, percent, DEFAULT_PROGRESS_MAX)
            .await;
        log::trace!("progress {} at {}%", id, percent);
        emit(ProgressEvent::Advanced { id, percent });
        drop(guard);
    }

    let mut guard = slot.lock().await;
    if token.is_cancelled() {
        return ProgressOutcome::Cancelled;
    }
    if let Err(e) = guard.session.complete() {
        log::warn!("{}", e);
        return ProgressOutcome::Cancelled;
    }
    guard.token = None;
    drop(guard);

    log::info!("progress session on {} complete", id);
    emit(ProgressEvent::Completed { id });
    ProgressOutcome::Completed
}
