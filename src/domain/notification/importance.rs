//! Importance level taxonomy

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidImportanceError;

use super::channel::{ChannelSpec, Severity, DEFAULT_VIBRATION_PATTERN, LIGHT_COLOR_RED};

/// All importance levels, most urgent first
pub const ALL_IMPORTANCE_LEVELS: &[ImportanceLevel] = &[
    ImportanceLevel::Urgent,
    ImportanceLevel::High,
    ImportanceLevel::Medium,
    ImportanceLevel::Low,
];

/// Importance level of a notification. Each level owns exactly one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImportanceLevel {
    #[default]
    Urgent,
    High,
    Medium,
    Low,
}

/// Fixed alerting behavior of a level's channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPolicy {
    pub severity: Severity,
    pub sound: bool,
    pub vibrate: bool,
    pub lights: bool,
}

/// Priority hint for hosts without channel support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Min,
    Low,
    Default,
    High,
}

impl Priority {
    /// Channel severity a priority stands in for
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Min => Severity::Min,
            Self::Low => Severity::Low,
            Self::Default => Severity::Default,
            Self::High => Severity::High,
        }
    }
}

/// Default alert effects requested alongside a priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlertDefaults {
    pub sound: bool,
    pub vibrate: bool,
    pub lights: bool,
}

/// Channel policy for a level
pub const fn policy_for(level: ImportanceLevel) -> ChannelPolicy {
    match level {
        ImportanceLevel::Urgent => ChannelPolicy {
            severity: Severity::High,
            sound: true,
            vibrate: true,
            lights: true,
        },
        ImportanceLevel::High => ChannelPolicy {
            severity: Severity::Default,
            sound: true,
            vibrate: true,
            lights: false,
        },
        ImportanceLevel::Medium => ChannelPolicy {
            severity: Severity::Low,
            sound: false,
            vibrate: false,
            lights: false,
        },
        ImportanceLevel::Low => ChannelPolicy {
            severity: Severity::Min,
            sound: false,
            vibrate: false,
            lights: false,
        },
    }
}

impl ImportanceLevel {
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Urgent => "Makes sound and appears as heads-up notification",
            Self::High => "Makes sound",
            Self::Medium => "No sound",
            Self::Low => "No sound and doesn't appear in status bar",
        }
    }

    /// Stable channel identifier
    pub const fn channel_id(&self) -> &'static str {
        match self {
            Self::Urgent => "channel_urgent",
            Self::High => "channel_high",
            Self::Medium => "channel_medium",
            Self::Low => "channel_low",
        }
    }

    pub const fn severity(&self) -> Severity {
        policy_for(*self).severity
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Priority and defaults used where the host has no channels
    pub const fn priority(&self) -> (Priority, AlertDefaults) {
        match self {
            Self::Urgent => (
                Priority::High,
                AlertDefaults {
                    sound: true,
                    vibrate: true,
                    lights: true,
                },
            ),
            Self::High => (
                Priority::Default,
                AlertDefaults {
                    sound: true,
                    vibrate: true,
                    lights: false,
                },
            ),
            Self::Medium => (
                Priority::Low,
                AlertDefaults {
                    sound: false,
                    vibrate: false,
                    lights: false,
                },
            ),
            Self::Low => (
                Priority::Min,
                AlertDefaults {
                    sound: false,
                    vibrate: false,
                    lights: false,
                },
            ),
        }
    }

    /// Build the channel registration for this level
    pub fn channel_spec(&self) -> ChannelSpec {
        let policy = policy_for(*self);
        ChannelSpec {
            id: self.channel_id().to_string(),
            display_name: self.display_name().to_string(),
            severity: policy.severity,
            description: self.description().to_string(),
            sound: policy.sound,
            vibration: policy.vibrate.then(|| DEFAULT_VIBRATION_PATTERN.to_vec()),
            light_color: policy.lights.then_some(LIGHT_COLOR_RED),
        }
    }

    /// Find the level owning a channel id
    pub fn from_channel_id(channel_id: &str) -> Option<Self> {
        ALL_IMPORTANCE_LEVELS
            .iter()
            .copied()
            .find(|level| level.channel_id() == channel_id)
    }
}

impl FromStr for ImportanceLevel {
    type Err = InvalidImportanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "urgent" => Ok(Self::Urgent),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(InvalidImportanceError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ImportanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
