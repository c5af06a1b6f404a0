//! Progress session domain

mod session;

pub use session::{
    progress_steps, InvalidStateTransition, ProgressSession, ProgressState, ProgressStep,
    COMPLETE_MESSAGE, COMPLETE_TITLE, DEFAULT_STEP_INTERVAL_MS, DOWNLOADING_TITLE, PROGRESS_STEP,
    PROGRESS_STEP_COUNT,
};
