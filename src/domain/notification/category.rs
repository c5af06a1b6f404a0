//! Notification categories

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidCategoryError;

/// All categories in display order
pub const ALL_CATEGORIES: &[Category] = &[
    Category::Alarm,
    Category::Reminder,
    Category::Message,
    Category::Call,
    Category::Event,
    Category::Progress,
    Category::Social,
    Category::Error,
    Category::Status,
];

/// Descriptive tag attached to a notification. Does not affect channel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
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

impl Category {
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Alarm => "Alarm",
            Self::Reminder => "Reminder",
            Self::Message => "Message",
            Self::Call => "Call",
            Self::Event => "Event",
            Self::Progress => "Progress",
            Self::Social => "Social",
            Self::Error => "Error",
            Self::Status => "Status",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Alarm => "Alarm or timer",
            Self::Reminder => "User-scheduled reminder",
            Self::Message => "Incoming message (SMS, chat)",
            Self::Call => "Incoming call (voice/video)",
            Self::Event => "Calendar event",
            Self::Progress => "Progress of a long-running operation",
            Self::Social => "Social network or sharing update",
            Self::Error => "Error in background operation",
            Self::Status => "Ongoing information about device status",
        }
    }

    /// Tag understood by the host notification service
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Alarm => "alarm",
            Self::Reminder => "reminder",
            Self::Message => "msg",
            Self::Call => "call",
            Self::Event => "event",
            Self::Progress => "progress",
            Self::Social => "social",
            Self::Error => "err",
            Self::Status => "status",
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Alarm => "alarm",
            Self::Reminder => "reminder",
            Self::Message => "message",
            Self::Call => "call",
            Self::Event => "event",
            Self::Progress => "progress",
            Self::Social => "social",
            Self::Error => "error",
            Self::Status => "status",
        }
    }
}

impl FromStr for Category {
    type Err = InvalidCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| InvalidCategoryError {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
