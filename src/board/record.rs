//! Client records and their positional types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::lane::Lane;

/// Keys owned by the record itself; never kept among opaque attributes
const RESERVED_FIELDS: [&str; 5] = ["id", "name", "status", "priority", "created_at"];

/// Store-assigned, immutable record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The identifier following this one
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority of zero was supplied where a 1-based rank is required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("priority must be at least 1")]
pub struct ZeroPriority;

/// A 1-based rank within a lane. Lower numbers come first.
///
/// Zero is unrepresentable, including through deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Priority(u32);

impl Priority {
    pub const FIRST: Priority = Priority(1);

    /// Returns `None` for zero
    pub fn new(value: u32) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The rank directly after a lane holding `count` records
    pub fn after(count: usize) -> Self {
        Self(u32::try_from(count).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Caps this priority at `ceiling`. A ceiling of zero is treated as 1.
    pub fn clamped_to(self, ceiling: usize) -> Self {
        let ceiling = u32::try_from(ceiling).unwrap_or(u32::MAX).max(1);
        Self(self.0.min(ceiling))
    }

    pub(crate) fn incremented(self) -> Self {
        Self(self.0 + 1)
    }

    pub(crate) fn decremented(self) -> Self {
        debug_assert!(self.0 > 1, "decrementing priority 1");
        Self((self.0 - 1).max(1))
    }
}

impl TryFrom<u32> for Priority {
    type Error = ZeroPriority;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ZeroPriority)
    }
}

impl From<Priority> for u32 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a record sits on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub lane: Lane,
    pub priority: Priority,
}

impl Position {
    pub fn new(lane: Lane, priority: Priority) -> Self {
        Self { lane, priority }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.lane, self.priority)
    }
}

/// A client on the board.
///
/// Only `lane` and `priority` are ever touched by reordering. The name,
/// creation time and any extra attributes are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "status")]
    pub lane: Lane,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ClientRecord {
    /// Materializes a new client at `priority` in its requested lane
    pub fn from_new(
        id: RecordId,
        priority: Priority,
        created_at: DateTime<Utc>,
        client: NewClient,
    ) -> Self {
        let mut attributes = client.attributes;
        for key in RESERVED_FIELDS {
            attributes.remove(key);
        }

        Self {
            id,
            name: client.name,
            lane: client.lane,
            priority,
            created_at,
            attributes,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.lane, self.priority)
    }

    pub(crate) fn reposition(&mut self, position: Position) {
        self.lane = position.lane;
        self.priority = position.priority;
    }
}

/// A client about to be appended to the end of a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    #[serde(rename = "status", default = "default_lane")]
    pub lane: Lane,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

fn default_lane() -> Lane {
    Lane::Backlog
}

impl NewClient {
    pub fn new(name: impl Into<String>, lane: Lane) -> Self {
        Self {
            name: name.into(),
            lane,
            attributes: Map::new(),
        }
    }

    /// Adds an opaque attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}
