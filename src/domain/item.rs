//! The todo item entity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by a store. Never reused after removal.
pub type TodoId = u64;

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(alias = "ID")]
    pub id: TodoId,
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(default, alias = "Done")]
    pub done: bool,
}

impl Item {
    /// Create a new, not yet done item
    pub fn new(id: TodoId, title: impl Into<String>) -> Self {
        Item {
            id,
            title: title.into(),
            done: false,
        }
    }

    /// Whether a title is acceptable for a new item
    pub fn is_valid_title(title: &str) -> bool {
        !title.trim().is_empty()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.done { "[X]" } else { "[ ]" };
        write!(f, "{:04}: {} {}", self.id, mark, self.title)
    }
}
