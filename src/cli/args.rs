//! CLI argument definitions using Clap

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::domain::notification::{Category, ImportanceLevel};
use crate::infrastructure::NotificationBackend;

/// notify-lab - exercise notification channels, categories and progress updates
#[derive(Parser, Debug)]
#[command(name = "notify-lab")]
#[command(version)]
#[command(about = "Exercise desktop notification channels, categories and progress updates")]
#[command(long_about = None)]
pub struct Cli {
    /// Notification backend
    #[arg(
        short = 'b',
        long,
        value_name = "BACKEND",
        env = "NOTIFY_LAB_BACKEND",
        global = true
    )]
    pub backend: Option<BackendArg>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to run (defaults to the interactive shell)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post a notification with custom text
    Send {
        /// Notification title
        #[arg(short = 't', long, value_name = "TEXT")]
        title: Option<String>,

        /// Notification body
        #[arg(short = 'm', long, value_name = "TEXT")]
        message: Option<String>,

        /// Importance level (selects the channel)
        #[arg(short = 'i', long, value_name = "LEVEL", default_value = "urgent")]
        importance: ImportanceArg,

        /// Category tag
        #[arg(short = 'c', long, value_name = "CATEGORY")]
        category: Option<CategoryArg>,
    },
    /// Post the sample notification of an importance level
    Importance {
        #[arg(value_name = "LEVEL")]
        level: ImportanceArg,
    },
    /// Post the sample notification of a category
    Category {
        #[arg(value_name = "CATEGORY")]
        category: CategoryArg,
    },
    /// Run a simulated download with a progress notification
    Progress,
    /// Show permission and channel status
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive shell
    Shell,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Backend argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Desktop,
    NotifySend,
    Memory,
}

impl From<BackendArg> for NotificationBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Desktop => NotificationBackend::Desktop,
            BackendArg::NotifySend => NotificationBackend::NotifySend,
            BackendArg::Memory => NotificationBackend::Memory,
        }
    }
}

/// Importance argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImportanceArg {
    Urgent,
    High,
    Medium,
    Low,
}

impl From<ImportanceArg> for ImportanceLevel {
    fn from(arg: ImportanceArg) -> Self {
        match arg {
            ImportanceArg::Urgent => ImportanceLevel::Urgent,
            ImportanceArg::High => ImportanceLevel::High,
            ImportanceArg::Medium => ImportanceLevel::Medium,
            ImportanceArg::Low => ImportanceLevel::Low,
        }
    }
}

/// Category argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Alarm,
    Reminder,
    Message,
    Call,
    Event,
    Progress,
    Social,
    Error,
    Status,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Alarm => Category::Alarm,
            CategoryArg::Reminder => Category::Reminder,
            CategoryArg::Message => Category::Message,
            CategoryArg::Call => Category::Call,
            CategoryArg::Event => Category::Event,
            CategoryArg::Progress => Category::Progress,
            CategoryArg::Social => Category::Social,
            CategoryArg::Error => Category::Error,
            CategoryArg::Status => Category::Status,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "app_name",
    "backend",
    "enabled",
    "blocked_channels",
    "title",
    "message",
    "progress.interval_ms",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["notify-lab"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parses_send() {
        let cli = Cli::parse_from([
            "notify-lab", "send", "-t", "Hello", "-m", "World", "-i", "low", "-c", "message",
        ]);
        match cli.command {
            Some(Commands::Send {
                title,
                message,
                importance,
                category,
            }) => {
                assert_eq!(title.as_deref(), Some("Hello"));
                assert_eq!(message.as_deref(), Some("World"));
                assert_eq!(importance, ImportanceArg::Low);
                assert_eq!(category, Some(CategoryArg::Message));
            }
            other => panic!("Expected Send command, got {:?}", other),
        }
    }

    #[test]
    fn send_defaults_to_urgent() {
        let cli = Cli::parse_from(["notify-lab", "send"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Send {
                importance: ImportanceArg::Urgent,
                category: None,
                ..
            })
        ));
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["notify-lab", "status", "--json", "-b", "memory", "-vv"]);
        assert_eq!(cli.backend, Some(BackendArg::Memory));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Status { json: true })));
    }

    #[test]
    fn backend_value_names() {
        let cli = Cli::parse_from(["notify-lab", "--backend", "notify-send", "progress"]);
        assert_eq!(cli.backend, Some(BackendArg::NotifySend));
        assert_eq!(
            NotificationBackend::from(BackendArg::NotifySend),
            NotificationBackend::NotifySend
        );
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["notify-lab", "config", "set", "backend", "memory"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "backend");
            assert_eq!(value, "memory");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn arg_conversions() {
        assert_eq!(ImportanceLevel::from(ImportanceArg::High), ImportanceLevel::High);
        assert_eq!(Category::from(CategoryArg::Error), Category::Error);
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("backend"));
        assert!(is_valid_config_key("progress.interval_ms"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
