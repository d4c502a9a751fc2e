//! Config command
//!
//! Manage huddle configuration.

use super::context::{load_config, Globals};
use super::init::default_config_toml;
use anyhow::Result;
use clap::Subcommand;
use huddle_core::config::Config;
use std::fs;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reset to default configuration
    Reset {
        /// Force reset without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}

impl ConfigCommand {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ConfigCommand::Show { .. } => "config_show",
            ConfigCommand::Reset { .. } => "config_reset",
            ConfigCommand::Validate => "config_validate",
        }
    }
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, globals: &Globals) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(globals, json),
        ConfigCommand::Reset { force } => reset_config(globals, force),
        ConfigCommand::Validate => validate_config(globals),
    }
}

fn show_config(globals: &Globals, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config = globals.load_config()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        let source = if globals.config_path().exists() {
            globals.config_path().display().to_string()
        } else {
            format!("{} (not found, defaults)", globals.config_path().display())
        };
        println!("{}", "Configuration:".bold().underline());
        println!("{}", source.dimmed());
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
    }

    Ok(())
}

fn reset_config(globals: &Globals, force: bool) -> Result<()> {
    use colored::Colorize;

    let config_path = globals.config_path();

    if !force {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt("Reset configuration to defaults?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    // Backup existing
    if config_path.exists() {
        let backup_path = format!(
            "{}.backup-{}",
            config_path.display(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        fs::copy(config_path, &backup_path)?;
        println!("{} Backed up to {}", "✓".green(), backup_path);
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(config_path, default_config_toml()?)?;

    println!("{} Configuration reset to defaults.", "✓".green());
    Ok(())
}

fn validate_config(globals: &Globals) -> Result<()> {
    use colored::Colorize;

    let config_path = globals.config_path();

    if !config_path.exists() {
        println!(
            "{} No configuration at {}; defaults apply.",
            "⚠".yellow(),
            config_path.display()
        );
        Config::default().validate()?;
        return Ok(());
    }

    let config = load_config(config_path)?;
    println!("{} Configuration is valid", "✓".green());
    println!(
        "  pages of {} (max {}), {} latest posts in stats, metrics {}",
        config.pagination.default_per_page,
        config.pagination.max_per_page,
        config.stats.latest_limit,
        if config.metrics.enabled {
            config.metrics.format.as_str()
        } else {
            "off"
        }
    );

    Ok(())
}
