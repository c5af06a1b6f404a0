//! Application layer - Use cases and port interfaces
//!
//! Contains the dispatch adapter, the progress session controller,
//! the presentation state holder and the trait definitions
//! for external system interactions.

pub mod console;
pub mod dispatch;
pub mod ports;
pub mod progress;

// Re-export use cases
pub use console::{ChannelReport, ConsoleState, NotificationConsole};
pub use dispatch::{progress_content, DispatchError, NotificationDispatcher};
pub use progress::{
    ProgressController, ProgressEvent, ProgressObserver, ProgressOutcome, ProgressRun,
};
