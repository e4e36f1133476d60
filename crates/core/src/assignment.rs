//! The assignment record and operation results.

use serde::{Deserialize, Serialize};

/// A single `(user_id, item_id, tag)` record.
///
/// There is no surrogate key: two assignments are the same assignment iff
/// all three fields are equal byte-for-byte. No case folding or trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(rename = "userID")]
    pub user_id: String,

    #[serde(rename = "itemID")]
    pub item_id: String,

    pub tag: String,
}

impl Assignment {
    pub fn new(
        user_id: impl Into<String>,
        item_id: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            tag: tag.into(),
        }
    }

    /// Does this assignment belong to `(user_id, item_id)`?
    pub fn is_on(&self, user_id: &str, item_id: &str) -> bool {
        self.user_id == user_id && self.item_id == item_id
    }

    /// Does this assignment carry `tag` for `user_id`?
    pub fn is_tagged(&self, user_id: &str, tag: &str) -> bool {
        self.user_id == user_id && self.tag == tag
    }

    /// Exact triple match.
    pub fn matches(&self, user_id: &str, item_id: &str, tag: &str) -> bool {
        self.is_on(user_id, item_id) && self.tag == tag
    }
}

/// Outcome of removing a tag from an item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Removal {
    /// Tags still held by the item after the removal, in store order.
    pub remaining: Vec<String>,

    /// Whether the store shrank.
    pub removed: bool,
}
