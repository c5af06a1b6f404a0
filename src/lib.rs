//! notify-lab - exercise desktop notification channels
//!
//! Posts notifications through four importance channels, tags them with
//! categories, and drives a single in-place progress notification from
//! 0% to 100%.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Importance levels, categories, channel specs, progress session, config
//! - **Application**: Dispatcher, progress controller, console state and port traits
//! - **Infrastructure**: Notification hosts (notify-rust, notify-send, in-memory) and config storage
//! - **CLI**: Argument parsing, presenter, interactive shell and logging setup

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
