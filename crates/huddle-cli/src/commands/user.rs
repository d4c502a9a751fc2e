//! User command
//!
//! Register and list forum members.

use super::context::{prompt_password, Globals};
use anyhow::{Context, Result};
use clap::Subcommand;
use huddle_core::auth;
use huddle_core::user::UserView;

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a new member
    Register {
        /// Unique username
        username: String,

        /// Unique email address
        email: String,

        /// Account password (prompted twice when omitted)
        #[arg(long, env = "HUDDLE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// List all members
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl UserCommand {
    pub fn endpoint(&self) -> &'static str {
        match self {
            UserCommand::Register { .. } => "user_register",
            UserCommand::List { .. } => "user_list",
        }
    }
}

/// Execute the user command
pub fn execute(cmd: UserCommand, globals: &Globals) -> Result<()> {
    use colored::Colorize;

    let ctx = globals.open()?;

    match cmd {
        UserCommand::Register {
            username,
            email,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password("Password", true)?,
            };
            let user = auth::register(ctx.store.as_ref(), &username, &email, &password)
                .context("Failed to register user")?;
            println!(
                "{} Welcome, {}! Your account is ready (id {}).",
                "✓".green(),
                user.username.bold(),
                user.id
            );
        }
        UserCommand::List { json } => {
            let users = ctx.store.users()?;
            if json {
                let views: Vec<UserView> = users.iter().map(UserView::from).collect();
                println!("{}", serde_json::to_string_pretty(&views)?);
                return Ok(());
            }
            if users.is_empty() {
                println!("No members yet.");
                return Ok(());
            }
            for user in users {
                println!(
                    "{:>4}  {}  {}",
                    user.id.to_string().dimmed(),
                    user.username.bold(),
                    user.email
                );
            }
        }
    }

    Ok(())
}
