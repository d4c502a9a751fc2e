//! Comment command

use super::context::{Credentials, Globals};
use anyhow::{Context, Result};
use clap::Subcommand;
use huddle_core::types::PostId;

/// Comment subcommands
#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// Reply to a post
    Add {
        /// Post ID
        post_id: String,

        #[command(flatten)]
        credentials: Credentials,

        /// Comment text
        content: String,
    },

    /// List the comments of a post, oldest first
    List {
        /// Post ID
        post_id: String,
    },
}

impl CommentCommand {
    pub fn endpoint(&self) -> &'static str {
        match self {
            CommentCommand::Add { .. } => "add_comment",
            CommentCommand::List { .. } => "comment_list",
        }
    }
}

/// Execute the comment command
pub fn execute(cmd: CommentCommand, globals: &Globals) -> Result<()> {
    use colored::Colorize;

    let ctx = globals.open()?;

    match cmd {
        CommentCommand::Add {
            post_id,
            credentials,
            content,
        } => {
            let post = ctx.posts.get_post(post_id.parse::<PostId>()?)?;
            let user = ctx.authenticate(&credentials)?;
            ctx.comments
                .add_comment(&post, &user, &content)
                .context("Could not add comment")?;
            println!("{} Comment added to \"{}\".", "✓".green(), post.title);
        }
        CommentCommand::List { post_id } => {
            let post = ctx.posts.get_post(post_id.parse::<PostId>()?)?;
            let listing = ctx.comments.comments_payload(&post)?;
            if listing.items.is_empty() {
                println!("{}", "No comments yet.".dimmed());
            }
            for comment in &listing.items {
                println!(
                    "{:>4}  {} {}",
                    comment.id.to_string().dimmed(),
                    comment.author.cyan(),
                    comment.date_posted.format("%Y-%m-%d %H:%M").to_string().dimmed()
                );
                println!("      {}", comment.content);
            }
        }
    }

    Ok(())
}
