//! Local caching module for offline-first painting.
//!
//! This module provides the `CacheManager` for storing and retrieving the
//! last successful response of each widget. Entries never expire; they are
//! overwritten by the next successful fetch.
//!
//! Backends:
//! - `FileStore`: one JSON file per key under the user cache directory
//! - `MemoryStore`: in-process map

pub mod manager;
pub mod store;

pub use manager::{keys, CacheManager};
pub use store::{FileStore, KeyValueStore, MemoryStore};
