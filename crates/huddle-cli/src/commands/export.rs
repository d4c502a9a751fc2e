//! Export command
//!
//! Export every post, newest first, with content.

use super::context::Globals;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use huddle_core::error::HuddleError;
use huddle_core::export::{export_filename, ExportManager};
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Export format (default from config)
    #[arg(long, short)]
    pub format: Option<String>,

    /// Output file path (default: timestamped file in the current directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Write to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

/// Execute the export command
pub fn execute(args: ExportArgs, globals: &Globals) -> Result<()> {
    use colored::Colorize;

    let ctx = globals.open()?;
    let manager = ExportManager::new();
    let format = args
        .format
        .unwrap_or_else(|| ctx.config.export.default_format.clone());

    let exporter = manager.get(&format).ok_or_else(|| {
        HuddleError::Validation(format!(
            "Unknown export format '{}' (available: {})",
            format,
            manager.available_formats().join(", ")
        ))
    })?;

    let posts = ctx.posts.export_posts_data()?;

    if args.stdout {
        let content = exporter.export(&posts)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.write_all(b"\n")?;
        return Ok(());
    }

    let path = args.output.unwrap_or_else(|| {
        PathBuf::from(export_filename(
            &ctx.config.export.filename_prefix,
            Utc::now(),
            exporter.file_extension(),
        ))
    });
    let written = manager
        .export_to_file(&posts, &format, &path)
        .context(format!("Failed to write {}", path.display()))?;

    println!(
        "{} Exported {} post{} to {}",
        "✓".green(),
        posts.len(),
        if posts.len() == 1 { "" } else { "s" },
        written.display()
    );
    Ok(())
}
