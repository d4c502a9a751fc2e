//! huddle-core - Core library for the huddle fantasy football forum
//!
//! This crate holds the forum's business logic: the post query service
//! (filtering, ordering, pagination, projection, stats and export), the
//! comment aggregator, password credentials and the in-process request
//! metrics registry.

pub mod error;
pub mod types;
pub mod config;
pub mod user;
pub mod auth;
pub mod validation;
pub mod post;
pub mod comment;
pub mod store;
pub mod metrics;
pub mod export;

pub use error::{HuddleError, Result};
pub use types::*;
