//! Post module
//!
//! Filtering, ordering, pagination and projection of forum posts.
//!
//! # Example
//!
//! ```ignore
//! use huddle_core::post::{PageRequest, PostService};
//! use huddle_core::store::MemoryStore;
//!
//! let service = PostService::new(Arc::new(MemoryStore::new()));
//! let page = service.paginate_posts(Some(Flair::Other), Some("waivers"), PageRequest::default())?;
//! let payload = service.page_to_dicts(page, false)?;
//! ```

pub mod model;
pub mod page;
pub mod projection;
mod service;

pub use model::{NewPost, Post, PostChanges, PostFilter};
pub use page::{Page, PageRequest};
pub use projection::{FlairCounts, PostView, StatsPayload};
pub use service::{PostService, DEFAULT_LATEST_LIMIT};
