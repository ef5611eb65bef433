//! Move request parsing
//!
//! A move body is `{"status"?: lane, "priority"?: integer}`. An absent key,
//! or an explicit `null`, keeps the current value. Other keys are ignored.

use serde_json::{Map, Value};

use crate::board::{Lane, Priority};
use crate::validator::{validate_lane_value, validate_priority};

use super::errors::{ApiError, ApiResult};

/// Parses a raw request body into a JSON object.
///
/// An empty body is read as `{}`.
pub fn parse_body(bytes: &[u8]) -> ApiResult<Map<String, Value>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ApiError::InvalidBody(format!(
            "expected an object, found {}",
            kind_of(&other)
        ))),
        Err(e) => Err(ApiError::InvalidBody(e.to_string())),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A validated move request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveRequest {
    pub lane: Option<Lane>,
    pub priority: Option<Priority>,
}

impl MoveRequest {
    /// Validates the `status` and `priority` fields of a move body.
    ///
    /// The lane is checked before the priority.
    pub fn from_body(body: &Map<String, Value>) -> ApiResult<Self> {
        let lane = match body.get("status") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(validate_lane_value(raw)?),
        };
        let priority = match body.get("priority") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(validate_priority(raw)?),
        };
        Ok(Self { lane, priority })
    }

    /// True when neither field was supplied
    pub fn is_empty(&self) -> bool {
        self.lane.is_none() && self.priority.is_none()
    }
}
