//! Bulk export of posts
//!
//! Exporters take the fully projected post list produced by
//! `PostService::export_posts_data` and render it to a file or stdout.

mod exporter;
mod json;

pub use exporter::{export_filename, ExportManager, Exporter};
pub use json::JsonExporter;
