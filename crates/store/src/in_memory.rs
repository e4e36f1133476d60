//! Linear-scan backend — a flat `Vec` of assignments.

use async_trait::async_trait;
use std::sync::Arc;
use tagging_core::Assignment;
use tagging_core::assignment::Removal;
use tagging_core::error::StoreError;
use tagging_core::store::{TagStore, check_apply_args, check_ids};
use tokio::sync::RwLock;

/// A store that keeps every assignment in one insertion-ordered `Vec`.
///
/// Every query is a full scan. Uniqueness of triples is enforced on insert.
pub struct InMemoryTagStore {
    entries: Arc<RwLock<Vec<Assignment>>>,
}

impl InMemoryTagStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryTagStore {
    fn default() -> Self {
        Self::new()
    }
}

fn tags_on(entries: &[Assignment], user_id: &str, item_id: &str) -> Vec<String> {
    entries
        .iter()
        .filter(|a| a.is_on(user_id, item_id))
        .map(|a| a.tag.clone())
        .collect()
}

#[async_trait]
impl TagStore for InMemoryTagStore {
    fn name(&self) -> &str {
        "scan"
    }

    async fn apply_tags(
        &self,
        user_id: &str,
        item_id: &str,
        tags: &[String],
    ) -> Result<Vec<String>, StoreError> {
        check_apply_args(user_id, item_id, tags)?;

        let mut entries = self.entries.write().await;
        for tag in tags {
            let exists = entries.iter().any(|a| a.matches(user_id, item_id, tag));
            if !exists {
                entries.push(Assignment::new(user_id, item_id, tag.as_str()));
            }
        }
        Ok(tags_on(&entries, user_id, item_id))
    }

    async fn tags_for_item(
        &self,
        user_id: &str,
        item_id: &str,
    ) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().await;
        Ok(tags_on(&entries, user_id, item_id))
    }

    async fn items_by_tag(&self, user_id: &str, tag: &str) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|a| a.is_tagged(user_id, tag))
            .map(|a| a.item_id.clone())
            .collect())
    }

    async fn remove_tag(
        &self,
        user_id: &str,
        item_id: &str,
        tag: &str,
    ) -> Result<Removal, StoreError> {
        check_ids(user_id, item_id)?;

        let mut entries = self.entries.write().await;
        let len_before = entries.len();
        entries.retain(|a| !a.matches(user_id, item_id, tag));
        Ok(Removal {
            removed: entries.len() < len_before,
            remaining: tags_on(&entries, user_id, item_id),
        })
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.entries.read().await.len())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.entries.write().await.clear();
        Ok(())
    }
}
