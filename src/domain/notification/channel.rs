//! Platform channel value objects

use std::fmt;

use serde::Serialize;

/// Platform importance ranking of a channel.
///
/// Ordered from fully blocked to heads-up, so `Severity::Low < Severity::High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Channel blocked by the user; nothing is shown
    None,
    /// Silent, hidden from the status bar
    Min,
    /// Silent
    Low,
    /// Makes sound
    Default,
    /// Makes sound and peeks on screen
    High,
}

/// Light color used by channels that blink (ARGB)
pub const LIGHT_COLOR_RED: u32 = 0xFFFF_0000;

/// Vibration pattern (ms): wait, buzz, pause, buzz
pub const DEFAULT_VIBRATION_PATTERN: [u64; 4] = [0, 250, 250, 250];

/// Channel registration as handed to the host notification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSpec {
    pub id: String,
    pub display_name: String,
    pub severity: Severity,
    pub description: String,
    /// Default notification sound
    pub sound: bool,
    /// Vibration pattern, if vibration is enabled
    pub vibration: Option<Vec<u64>>,
    /// Light color, if lights are enabled
    pub light_color: Option<u32>,
}

/// User-facing status label of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChannelStatus {
    Blocked,
    LowSilent,
    MediumSilent,
    HighSound,
    UrgentHeadsUp,
    Unknown,
}

impl ChannelStatus {
    /// Map a channel's severity to its status; a missing channel is `Unknown`
    pub fn from_severity(severity: Option<Severity>) -> Self {
        match severity {
            Some(Severity::None) => Self::Blocked,
            Some(Severity::Min) => Self::LowSilent,
            Some(Severity::Low) => Self::MediumSilent,
            Some(Severity::Default) => Self::HighSound,
            Some(Severity::High) => Self::UrgentHeadsUp,
            None => Self::Unknown,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Blocked => "Blocked",
            Self::LowSilent => "Low (Silent)",
            Self::MediumSilent => "Medium (Silent)",
            Self::HighSound => "High (Sound)",
            Self::UrgentHeadsUp => "Urgent (Sound + Heads-up)",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
