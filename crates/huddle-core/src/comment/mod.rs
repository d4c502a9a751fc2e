//! Comment module
//!
//! Comment records, their transport projection and per-post listings.

pub mod model;
mod aggregator;

pub use aggregator::CommentAggregator;
pub use model::{Comment, CommentListing, CommentView, NewComment};
