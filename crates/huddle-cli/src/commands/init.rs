//! Init command
//!
//! Create the data directory and a default configuration file.

use super::context::Globals;
use anyhow::{Context, Result};
use clap::Args;
use huddle_core::config::Config;
use huddle_storage::FileSystemStore;
use std::fs;

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

/// Execute the init command
pub fn execute(args: InitArgs, globals: &Globals) -> Result<()> {
    use colored::Colorize;

    let config_path = globals.config_path();
    println!("{} Initializing huddle...", "🏈".to_string());

    if config_path.exists() && !args.force {
        eprintln!(
            "{} Configuration already exists at {}. Use --force to overwrite.",
            "⚠".yellow(),
            config_path.display()
        );
    } else {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(config_path, default_config_toml()?).context("Failed to write config.toml")?;
        println!("{} Wrote {}", "✓".green(), config_path.display());
    }

    let config = globals.load_config()?;
    let data_dir = globals.data_dir(&config);
    let store = FileSystemStore::new(&data_dir)?;
    println!("{} Data directory ready at {}", "✓".green(), store.base_dir().display());

    println!("\n{}", "Next steps:".bold());
    println!("  1. Register a member:");
    println!("     {}", "huddle user register <username> <email>".cyan());
    println!("  2. Publish your first post (asks for the password):");
    println!(
        "     {}",
        "huddle post new --as <username> --title ... --flair other --content ...".cyan()
    );

    Ok(())
}

/// Default configuration rendered as TOML
pub fn default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&Config::default())?;
    Ok(format!("# huddle configuration\n\n{}", body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_back() {
        let text = default_config_toml().unwrap();
        assert!(text.contains("[pagination]"));

        let config: Config = toml::from_str(&text).unwrap();
        config.validate().unwrap();
        assert_eq!(config.export.filename_prefix, "posts-export");
    }
}
