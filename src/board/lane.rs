//! Workflow lanes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three fixed workflow stages.
///
/// Declaration order is workflow order, which is also the order
/// full-board listings use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lane {
    Backlog,
    InProgress,
    Complete,
}

impl Lane {
    /// All lanes, in listing order
    pub const ALL: [Lane; 3] = [Lane::Backlog, Lane::InProgress, Lane::Complete];

    /// Returns the wire tag for this lane
    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Backlog => "backlog",
            Lane::InProgress => "in-progress",
            Lane::Complete => "complete",
        }
    }

    /// Exact, case-sensitive tag lookup
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lane| lane.as_str() == tag)
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the three lane tags
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized lane tag '{0}'")]
pub struct ParseLaneError(pub String);

impl FromStr for Lane {
    type Err = ParseLaneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| ParseLaneError(s.to_string()))
    }
}
