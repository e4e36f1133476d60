//! Indexed backend — secondary indices instead of full scans.
//!
//! Keeps two maps, `(user, item) → tags` and `(user, tag) → items`, each
//! vector in insertion order. Because both orders are insertion order of
//! the surviving assignments, every query returns exactly what the
//! linear-scan backend would return for the same history.

use async_trait::async_trait;
use std::collections::HashMap;
use tagging_core::assignment::Removal;
use tagging_core::error::StoreError;
use tagging_core::store::{TagStore, check_apply_args, check_ids};
use tokio::sync::RwLock;

type Key = (String, String);

fn key(a: &str, b: &str) -> Key {
    (a.to_string(), b.to_string())
}

#[derive(Default)]
struct Indexes {
    tags_by_item: HashMap<Key, Vec<String>>,
    items_by_tag: HashMap<Key, Vec<String>>,
    total: usize,
}

impl Indexes {
    fn tags_on(&self, item_key: &Key) -> Vec<String> {
        self.tags_by_item.get(item_key).cloned().unwrap_or_default()
    }
}

/// A store backed by per-item and per-tag indices.
pub struct IndexedTagStore {
    indexes: RwLock<Indexes>,
}

impl IndexedTagStore {
    pub fn new() -> Self {
        Self {
            indexes: RwLock::new(Indexes::default()),
        }
    }
}

impl Default for IndexedTagStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagStore for IndexedTagStore {
    fn name(&self) -> &str {
        "indexed"
    }

    async fn apply_tags(
        &self,
        user_id: &str,
        item_id: &str,
        tags: &[String],
    ) -> Result<Vec<String>, StoreError> {
        check_apply_args(user_id, item_id, tags)?;

        let mut idx = self.indexes.write().await;
        let item_key = key(user_id, item_id);
        for tag in tags {
            let held = idx.tags_by_item.entry(item_key.clone()).or_default();
            if held.contains(tag) {
                continue;
            }
            held.push(tag.clone());
            idx.items_by_tag
                .entry(key(user_id, tag))
                .or_default()
                .push(item_id.to_string());
            idx.total += 1;
        }
        Ok(idx.tags_on(&item_key))
    }

    async fn tags_for_item(
        &self,
        user_id: &str,
        item_id: &str,
    ) -> Result<Vec<String>, StoreError> {
        let idx = self.indexes.read().await;
        Ok(idx.tags_on(&key(user_id, item_id)))
    }

    async fn items_by_tag(&self, user_id: &str, tag: &str) -> Result<Vec<String>, StoreError> {
        let idx = self.indexes.read().await;
        Ok(idx
            .items_by_tag
            .get(&key(user_id, tag))
            .cloned()
            .unwrap_or_default())
    }

    async fn remove_tag(
        &self,
        user_id: &str,
        item_id: &str,
        tag: &str,
    ) -> Result<Removal, StoreError> {
        check_ids(user_id, item_id)?;

        let mut idx = self.indexes.write().await;
        let item_key = key(user_id, item_id);
        let tag_key = key(user_id, tag);

        let tag_pos = idx
            .tags_by_item
            .get(&item_key)
            .and_then(|held| held.iter().position(|t| t == tag));
        let Some(tag_pos) = tag_pos else {
            return Ok(Removal {
                removed: false,
                remaining: idx.tags_on(&item_key),
            });
        };

        // Both indices must agree before either is touched.
        let item_pos = idx
            .items_by_tag
            .get(&tag_key)
            .and_then(|items| items.iter().position(|i| i == item_id))
            .ok_or_else(|| {
                tracing::error!(user_id, item_id, tag, "Tag index missing item");
                StoreError::Storage(format!(
                    "tag index has no entry for item '{item_id}' under tag '{tag}'"
                ))
            })?;

        if let Some(held) = idx.tags_by_item.get_mut(&item_key) {
            held.remove(tag_pos);
            if held.is_empty() {
                idx.tags_by_item.remove(&item_key);
            }
        }
        if let Some(items) = idx.items_by_tag.get_mut(&tag_key) {
            items.remove(item_pos);
            if items.is_empty() {
                idx.items_by_tag.remove(&tag_key);
            }
        }
        idx.total -= 1;

        Ok(Removal {
            removed: true,
            remaining: idx.tags_on(&item_key),
        })
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.indexes.read().await.total)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.indexes.write().await = Indexes::default();
        Ok(())
    }
}
