//! Work status and priority vocabularies.
//!
//! Both enums travel over the wire as kebab-case strings. Priority also
//! accepts the legacy numeric levels some backend rows still carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle state of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Overdue,
}

impl WorkStatus {
    pub const ALL: [WorkStatus; 4] = [
        WorkStatus::NotStarted,
        WorkStatus::InProgress,
        WorkStatus::Completed,
        WorkStatus::Overdue,
    ];

    /// Position used by the status sort: most urgent first.
    pub fn rank(self) -> u8 {
        match self {
            Self::Overdue => 0,
            Self::InProgress => 1,
            Self::NotStarted => 2,
            Self::Completed => 3,
        }
    }

    /// Progress implied by entering this status, if any.
    ///
    /// `None` means the current progress is kept.
    pub fn implied_progress(self) -> Option<u8> {
        match self {
            Self::NotStarted => Some(0),
            Self::Completed => Some(100),
            Self::InProgress | Self::Overdue => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown work status: {s}")))
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    fn from_level(level: i64) -> Self {
        match level {
            i64::MIN..=1 => Self::Low,
            2 => Self::Medium,
            _ => Self::High,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(CoreError::Validation(format!("Unknown priority: {other}"))),
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Level(i64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => match name.parse::<i64>() {
                Ok(level) => Ok(Self::from_level(level)),
                Err(_) => name.parse().map_err(serde::de::Error::custom),
            },
            Repr::Level(level) => Ok(Self::from_level(level)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
