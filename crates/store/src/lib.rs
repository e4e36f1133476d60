//! Tag store backends for the tagging service.

pub mod in_memory;
pub mod indexed;

pub use in_memory::InMemoryTagStore;
pub use indexed::IndexedTagStore;

use std::sync::Arc;
use tagging_config::{AppConfig, StoreBackend};
use tagging_core::TagStore;

/// Build a store for the given backend kind.
pub fn build_store(kind: StoreBackend) -> Arc<dyn TagStore> {
    match kind {
        StoreBackend::Scan => Arc::new(InMemoryTagStore::new()),
        StoreBackend::Indexed => Arc::new(IndexedTagStore::new()),
    }
}

/// Build the store selected by `config.store.backend`.
pub fn build_from_config(config: &AppConfig) -> Arc<dyn TagStore> {
    let store = build_store(config.store.backend);
    tracing::debug!(backend = store.name(), "Tag store initialized");
    store
}
