//! Progress session state machine

use std::fmt;
use thiserror::Error;

use crate::domain::notification::NotificationId;

/// Increment applied on every step
pub const PROGRESS_STEP: u32 = 5;

/// Number of steps between 0% and completion
pub const PROGRESS_STEP_COUNT: u32 = 100 / PROGRESS_STEP;

/// Default pause between two steps
pub const DEFAULT_STEP_INTERVAL_MS: u64 = 200;

pub const DOWNLOADING_TITLE: &str = "Downloading...";
pub const COMPLETE_TITLE: &str = "Download Complete";
pub const COMPLETE_MESSAGE: &str = "File downloaded successfully";

/// Progress session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgressState {
    #[default]
    Idle,
    Running,
}

impl ProgressState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
        }
    }
}

impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: ProgressState,
    pub action: String,
}

/// One scheduled update of a running session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStep {
    pub percent: u32,
    pub title: &'static str,
    pub body: String,
}

impl ProgressStep {
    /// Content of the notification posted when a session starts
    pub fn initial() -> Self {
        Self {
            percent: 0,
            title: DOWNLOADING_TITLE,
            body: "0%".to_string(),
        }
    }
}

/// Updates following the initial post: 5%, 10%, ... 95%, then the
/// completion message at 100%.
pub fn progress_steps() -> impl Iterator<Item = ProgressStep> {
    (1..=PROGRESS_STEP_COUNT).map(|n| {
        let percent = n * PROGRESS_STEP;
        if percent >= 100 {
            ProgressStep {
                percent: 100,
                title: COMPLETE_TITLE,
                body: COMPLETE_MESSAGE.to_string(),
            }
        } else {
            ProgressStep {
                percent,
                title: DOWNLOADING_TITLE,
                body: format!("{}%", percent),
            }
        }
    })
}

/// Progress session entity.
///
/// State machine:
///   IDLE -> RUNNING (start)
///   RUNNING -> RUNNING (advance)
///   RUNNING -> IDLE (complete)
///   any -> IDLE (cancel)
#[derive(Debug, Default)]
pub struct ProgressSession {
    state: ProgressState,
    notification_id: Option<NotificationId>,
    progress: u32,
}

impl ProgressSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ProgressState::Running
    }

    pub fn notification_id(&self) -> Option<NotificationId> {
        self.notification_id
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Transition from IDLE to RUNNING for the given notification
    pub fn start(&mut self, id: NotificationId) -> Result<(), InvalidStateTransition> {
        if self.is_running() {
            return Err(self.invalid("start"));
        }
        self.state = ProgressState::Running;
        self.notification_id = Some(id);
        self.progress = 0;
        Ok(())
    }

    /// Record a new percentage while RUNNING
    pub fn advance(&mut self, percent: u32) -> Result<(), InvalidStateTransition> {
        if !self.is_running() {
            return Err(self.invalid("advance"));
        }
        self.progress = percent.min(100);
        Ok(())
    }

    /// Transition from RUNNING to IDLE after the final step
    pub fn complete(&mut self) -> Result<NotificationId, InvalidStateTransition> {
        let id = match (self.state, self.notification_id) {
            (ProgressState::Running, Some(id)) => id,
            _ => return Err(self.invalid("complete")),
        };
        self.progress = 100;
        self.reset();
        Ok(id)
    }

    /// Force IDLE from any state. Returns the released notification id.
    pub fn cancel(&mut self) -> Option<NotificationId> {
        let id = self.notification_id;
        self.reset();
        id
    }

    fn reset(&mut self) {
        self.state = ProgressState::Idle;
        self.notification_id = None;
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }
}
