//! huddle-storage - Storage library for huddle
//!
//! This crate provides the JSON file backed implementation of the forum store.

mod forum_store;

pub use forum_store::{FileSystemStore, StoreFile, CURRENT_SCHEMA_VERSION, DATA_FILE_NAME};
