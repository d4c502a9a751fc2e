//! CLI commands module
//!
//! This module contains all CLI command implementations. Every command is
//! timed and recorded in a [`MetricsRegistry`] under its endpoint label.

pub mod api;
pub mod comment;
pub mod config;
pub mod context;
pub mod export;
pub mod init;
pub mod post;
pub mod user;

use clap::{Parser, Subcommand};
use huddle_core::error::HuddleError;
use huddle_core::metrics::MetricsRegistry;
use std::path::PathBuf;

use context::Globals;

/// huddle - fantasy football community forum
#[derive(Debug, Parser)]
#[command(name = "huddle")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides store.data_dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print a metrics snapshot to stderr on exit
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the data directory and default configuration
    Init(init::InitArgs),

    /// Manage forum members
    #[command(subcommand)]
    User(user::UserCommand),

    /// Publish, edit and browse posts
    #[command(subcommand)]
    Post(post::PostCommand),

    /// Comment on posts
    #[command(subcommand)]
    Comment(comment::CommentCommand),

    /// JSON API views
    #[command(subcommand)]
    Api(api::ApiCommand),

    /// Export all posts
    Export(export::ExportArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

impl Commands {
    /// Label the command is recorded under
    pub fn endpoint(&self) -> &'static str {
        match self {
            Commands::Init(_) => "init",
            Commands::User(cmd) => cmd.endpoint(),
            Commands::Post(cmd) => cmd.endpoint(),
            Commands::Comment(cmd) => cmd.endpoint(),
            Commands::Api(cmd) => cmd.endpoint(),
            Commands::Export(_) => "export",
            Commands::Config(cmd) => cmd.endpoint(),
        }
    }
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let globals = Globals::new(cli.config, cli.data_dir);
    let metrics_config = globals.metrics_config();
    let registry = MetricsRegistry::new();

    let timer = registry.start(cli.command.endpoint());
    let result = dispatch(cli.command, &globals);
    if metrics_config.enabled {
        timer.finish(status_of(&result));
    }

    if cli.metrics {
        print_metrics(&registry, &metrics_config.format)?;
    }

    result
}

fn dispatch(command: Commands, globals: &Globals) -> anyhow::Result<()> {
    match command {
        Commands::Init(args) => init::execute(args, globals),
        Commands::User(cmd) => user::execute(cmd, globals),
        Commands::Post(cmd) => post::execute(cmd, globals),
        Commands::Comment(cmd) => comment::execute(cmd, globals),
        Commands::Api(cmd) => api::execute(cmd, globals),
        Commands::Export(args) => export::execute(args, globals),
        Commands::Config(cmd) => config::execute(cmd, globals),
    }
}

/// HTTP-style status for a command outcome
fn status_of(result: &anyhow::Result<()>) -> u16 {
    match result {
        Ok(()) => 200,
        Err(err) => err
            .chain()
            .find_map(|cause| cause.downcast_ref::<HuddleError>())
            .map(HuddleError::status_code)
            .unwrap_or(500),
    }
}

fn print_metrics(registry: &MetricsRegistry, format: &str) -> anyhow::Result<()> {
    if format == "prometheus" {
        eprint!("{}", registry.render_prometheus());
    } else {
        eprintln!("{}", serde_json::to_string_pretty(&registry.snapshot())?);
    }
    Ok(())
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout carries JSON payloads
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
