//! Exporter trait and manager

use crate::error::{HuddleError, Result};
use crate::post::PostView;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Trait for post exporters
pub trait Exporter: Send + Sync {
    /// Render fully projected posts
    fn export(&self, posts: &[PostView]) -> Result<String>;

    /// Get the format name
    fn format_name(&self) -> &str;

    /// Get the file extension
    fn file_extension(&self) -> &str;
}

/// Manager for handling multiple export formats
pub struct ExportManager {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create a new export manager with default exporters
    pub fn new() -> Self {
        let mut manager = Self {
            exporters: HashMap::new(),
        };

        manager.register(Box::new(super::json::JsonExporter::new()));

        manager
    }

    /// Register a new exporter
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters
            .insert(exporter.format_name().to_string(), exporter);
    }

    /// Export posts to the specified format
    pub fn export(&self, posts: &[PostView], format: &str) -> Result<String> {
        self.exporter(format)?.export(posts)
    }

    /// Export posts to a file, adding the format's extension when the path has none
    pub fn export_to_file(&self, posts: &[PostView], format: &str, path: &Path) -> Result<PathBuf> {
        let exporter = self.exporter(format)?;
        let content = exporter.export(posts)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let final_path = if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(exporter.file_extension())
        };

        // Atomic write through a hidden temp sibling
        let file_name = final_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = final_path.with_file_name(format!(".{}.tmp", file_name));
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;
        }

        fs::rename(&temp_path, &final_path)?;
        Ok(final_path)
    }

    /// Get list of available format names
    pub fn available_formats(&self) -> Vec<String> {
        let mut formats: Vec<_> = self.exporters.keys().cloned().collect();
        formats.sort();
        formats
    }

    /// Get an exporter by format name
    pub fn get(&self, format: &str) -> Option<&dyn Exporter> {
        self.exporters.get(format).map(|e| e.as_ref())
    }

    fn exporter(&self, format: &str) -> Result<&dyn Exporter> {
        self.get(format).ok_or_else(|| {
            HuddleError::Validation(format!("Unknown export format: {}", format))
        })
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Download name such as `posts-export-20240908-170000Z.json`
pub fn export_filename(prefix: &str, at: DateTime<Utc>, extension: &str) -> String {
    format!("{}-{}.{}", prefix, at.format("%Y%m%d-%H%M%SZ"), extension)
}
