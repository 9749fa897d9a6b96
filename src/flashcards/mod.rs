//! Vocabulary card collection for Tango
//!
//! This module provides:
//! - The card model (native prompt, target answer, study fields)
//! - The `CardStore` trait with JSON-file and in-memory backends
//! - Collection queries (genres, weak cards, favourites, search)

pub mod collection;
pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{CardStore, JsonCardStore, MemoryCardStore, StoreError};
