//! # Tagging Core
//!
//! Domain types, the store trait, and error definitions for the tagging
//! service. This crate has **no framework dependencies**: it defines the
//! model that the store backends and the HTTP gateway implement against.
//!
//! The whole system state is a flat collection of [`Assignment`]s, each a
//! `(user_id, item_id, tag)` triple. [`TagStore`] is the seam between that
//! collection and the request handlers.

pub mod assignment;
pub mod error;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use assignment::{Assignment, Removal};
pub use error::{Result, StoreError};
pub use store::TagStore;
