//! Configuration management for huddle

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store settings
    pub store: StoreConfig,
    /// Pagination settings
    pub pagination: PaginationConfig,
    /// Stats settings
    pub stats: StatsConfig,
    /// Export settings
    pub export: ExportConfig,
    /// Metrics settings
    pub metrics: MetricsConfig,
}

/// Store-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the forum data file; unset means the platform data dir
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Pagination-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size when the caller gives none
    pub default_per_page: u32,
    /// Upper bound for the page size
    pub max_per_page: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: 10,
            max_per_page: 50,
        }
    }
}

/// Stats-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Number of recent posts in the stats payload
    pub latest_limit: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { latest_limit: 5 }
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default export format
    pub default_format: String,
    /// Prefix for generated export file names
    pub filename_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "json".to_string(),
            filename_prefix: "posts-export".to_string(),
        }
    }
}

/// Metrics-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Record per-command metrics
    pub enabled: bool,
    /// Output format for the snapshot ("json" or "prometheus")
    pub format: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            format: "json".to_string(),
        }
    }
}

impl Config {
    /// Check values that serde cannot
    pub fn validate(&self) -> crate::Result<()> {
        let p = &self.pagination;
        if p.max_per_page == 0 {
            return Err(crate::HuddleError::Config(
                "pagination.max_per_page must be at least 1".to_string(),
            ));
        }
        if p.default_per_page == 0 || p.default_per_page > p.max_per_page {
            return Err(crate::HuddleError::Config(format!(
                "pagination.default_per_page must be between 1 and {}",
                p.max_per_page
            )));
        }
        if !matches!(self.metrics.format.as_str(), "json" | "prometheus") {
            return Err(crate::HuddleError::Config(format!(
                "Unknown metrics format: {}",
                self.metrics.format
            )));
        }
        Ok(())
    }
}
