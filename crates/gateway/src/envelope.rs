//! JSON response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Success,
    Error,
}

/// `{status, message?, data?}`
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<()> {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Tags currently held by one item.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemTags {
    #[serde(rename = "userID")]
    pub user_id: String,

    #[serde(rename = "itemID")]
    pub item_id: String,

    pub tags: Vec<String>,
}

/// Items carrying one tag.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaggedItems {
    #[serde(rename = "userID")]
    pub user_id: String,

    pub tag: String,

    #[serde(rename = "itemIDs")]
    pub item_ids: Vec<String>,
}
