//! Todo model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::DateBucket;

/// Action type given to new todos when none is chosen.
pub const DEFAULT_ACTION_TYPE: &str = "buy";

/// Represents a task, optionally anchored to a place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    /// Opaque identifier assigned by the store
    pub id: String,

    /// Brief title of the todo (never empty)
    pub title: String,

    /// Free-form description, possibly empty
    #[serde(default)]
    pub description: String,

    /// What kind of errand this is (buy, call, visit, ...); display only
    #[serde(default)]
    pub action_type: String,

    /// Coarse due date
    #[serde(default)]
    pub date_bucket: DateBucket,

    /// Priority from 1 (lowest) to 5 (highest)
    #[serde(default)]
    pub priority: Priority,

    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Place this todo is anchored to, if any
    #[serde(default)]
    pub place_id: Option<String>,

    /// Whether the todo has been completed
    #[serde(default)]
    pub is_done: bool,

    /// Timestamp assigned by the store when the todo was created (UTC)
    pub created_at: Timestamp,
}

/// Todo priority, always within 1..=5.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(from = "i64", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: Priority = Priority(1);
    pub const MAX: Priority = Priority(5);

    /// Clamps any integer into the valid range.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(1, 5) as u8)
    }

    /// Parses user input; anything that is not an integer becomes the lowest
    /// priority.
    pub fn parse_lenient(input: &str) -> Self {
        input
            .trim()
            .parse::<i64>()
            .map(Self::new)
            .unwrap_or(Self::MIN)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(3)
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

/// Splits a comma-separated tag list, trimming entries and dropping empty
/// and repeated ones.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
