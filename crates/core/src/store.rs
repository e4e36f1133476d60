//! TagStore trait — the single piece of state in the service.
//!
//! A store holds every [`Assignment`](crate::Assignment) and answers four
//! operations over it. Implementations must:
//! - never hold two assignments with the same `(user, item, tag)` triple
//! - return query results in insertion order
//! - run each operation's scan and mutation under one lock acquisition, so
//!   concurrent callers never observe a half-applied operation

use async_trait::async_trait;

use crate::assignment::Removal;
use crate::error::StoreError;

/// The core TagStore trait.
///
/// Implementations: linear scan over a `Vec` (`scan`), and a secondary-index
/// variant with identical observable behavior (`indexed`).
#[async_trait]
pub trait TagStore: Send + Sync {
    /// The backend name (e.g., "scan", "indexed").
    fn name(&self) -> &str;

    /// Apply `tags` to `(user_id, item_id)` in order, skipping triples that
    /// already exist. Returns every tag now held by the item.
    async fn apply_tags(
        &self,
        user_id: &str,
        item_id: &str,
        tags: &[String],
    ) -> Result<Vec<String>, StoreError>;

    /// Tags held by `(user_id, item_id)`. Empty when none.
    async fn tags_for_item(&self, user_id: &str, item_id: &str)
    -> Result<Vec<String>, StoreError>;

    /// Item IDs carrying `tag` for `user_id`. Empty when none.
    async fn items_by_tag(&self, user_id: &str, tag: &str) -> Result<Vec<String>, StoreError>;

    /// Remove the exact triple. A missing triple is reported through
    /// `Removal::removed == false`, never as an error.
    async fn remove_tag(
        &self,
        user_id: &str,
        item_id: &str,
        tag: &str,
    ) -> Result<Removal, StoreError>;

    /// Total number of assignments held.
    async fn count(&self) -> Result<usize, StoreError>;

    /// Drop every assignment.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Precondition check shared by backends for `apply_tags`.
///
/// Individual tag contents are not validated: empty-string tags are allowed.
pub fn check_apply_args(user_id: &str, item_id: &str, tags: &[String]) -> Result<(), StoreError> {
    check_ids(user_id, item_id)?;
    if tags.is_empty() {
        return Err(StoreError::InvalidInput("tags must not be empty".into()));
    }
    Ok(())
}

/// `user_id` and `item_id` must both be non-empty.
pub fn check_ids(user_id: &str, item_id: &str) -> Result<(), StoreError> {
    if user_id.is_empty() {
        return Err(StoreError::InvalidInput("user_id is empty".into()));
    }
    if item_id.is_empty() {
        return Err(StoreError::InvalidInput("item_id is empty".into()));
    }
    Ok(())
}
