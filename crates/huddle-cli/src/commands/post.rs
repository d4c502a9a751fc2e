//! Post command
//!
//! Publish, edit, delete and browse posts.

use super::context::{parse_flair, AppContext, Credentials, Globals};
use anyhow::{Context, Result};
use clap::Subcommand;
use huddle_core::post::{PostChanges, PostView};
use huddle_core::types::{Flair, FlairQuery, PostId};

/// Post subcommands
#[derive(Debug, Subcommand)]
pub enum PostCommand {
    /// Publish a new post
    New {
        #[command(flatten)]
        credentials: Credentials,

        /// Post title
        #[arg(long)]
        title: String,

        /// TRADE_HELP, WAIVER_WIRE, INJURY_TALK or OTHER
        #[arg(long, default_value = "OTHER")]
        flair: String,

        /// Post body
        #[arg(long)]
        content: String,
    },

    /// Edit one of your posts
    Edit {
        /// Post ID
        id: String,

        #[command(flatten)]
        credentials: Credentials,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New flair
        #[arg(long)]
        flair: Option<String>,

        /// New body
        #[arg(long)]
        content: Option<String>,
    },

    /// Delete one of your posts and its comments
    Delete {
        /// Post ID
        id: String,

        #[command(flatten)]
        credentials: Credentials,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Show a post with its comments
    Show {
        /// Post ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List posts, newest first
    List {
        /// Only posts with this flair
        #[arg(long)]
        flair: Option<String>,
    },
}

impl PostCommand {
    pub fn endpoint(&self) -> &'static str {
        match self {
            PostCommand::New { .. } => "post_new",
            PostCommand::Edit { .. } => "post_edit",
            PostCommand::Delete { .. } => "post_delete",
            PostCommand::Show { .. } => "post_detail",
            PostCommand::List { .. } => "home",
        }
    }
}

/// Execute the post command
pub fn execute(cmd: PostCommand, globals: &Globals) -> Result<()> {
    let ctx = globals.open()?;

    match cmd {
        PostCommand::New {
            credentials,
            title,
            flair,
            content,
        } => new_post(&ctx, &credentials, &title, &flair, &content),
        PostCommand::Edit {
            id,
            credentials,
            title,
            flair,
            content,
        } => {
            let changes = PostChanges {
                title,
                flair: parse_flair(flair.as_deref())?,
                content,
            };
            edit_post(&ctx, &id, &credentials, changes)
        }
        PostCommand::Delete {
            id,
            credentials,
            yes,
        } => delete_post(&ctx, &id, &credentials, yes),
        PostCommand::Show { id, json } => show_post(&ctx, &id, json),
        PostCommand::List { flair } => list_posts(&ctx, flair.as_deref()),
    }
}

fn new_post(
    ctx: &AppContext,
    credentials: &Credentials,
    title: &str,
    flair: &str,
    content: &str,
) -> Result<()> {
    use colored::Colorize;

    let user = ctx.authenticate(credentials)?;
    let flair: Flair = flair.parse()?;
    let post = ctx
        .posts
        .create_post(&user, title, flair, content)
        .context("Failed to create post")?;

    println!("{} Your post has been created (id {}).", "✓".green(), post.id);
    Ok(())
}

fn edit_post(
    ctx: &AppContext,
    id: &str,
    credentials: &Credentials,
    changes: PostChanges,
) -> Result<()> {
    use colored::Colorize;

    let id: PostId = id.parse()?;
    let user = ctx.authenticate(credentials)?;
    let post = ctx
        .posts
        .update_post(id, &user, changes)
        .context("Failed to update post")?;

    println!("{} Post {} updated: {}", "✓".green(), post.id, post.title.bold());
    Ok(())
}

fn delete_post(ctx: &AppContext, id: &str, credentials: &Credentials, yes: bool) -> Result<()> {
    use colored::Colorize;

    let id: PostId = id.parse()?;
    let user = ctx.authenticate(credentials)?;
    let post = ctx
        .posts
        .editable_post(id, &user)
        .context("Failed to delete post")?;

    if !yes {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\" and all its comments?", post.title))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Delete cancelled.");
            return Ok(());
        }
    }

    let removed = ctx
        .posts
        .delete_post(id, &user)
        .context("Failed to delete post")?;
    println!(
        "{} Post {} deleted ({} comment{} removed).",
        "✓".green(),
        id,
        removed,
        if removed == 1 { "" } else { "s" }
    );
    Ok(())
}

fn show_post(ctx: &AppContext, id: &str, json: bool) -> Result<()> {
    use colored::Colorize;

    let id: PostId = id.parse()?;
    let post = ctx.posts.get_post(id)?;
    let view = ctx.posts.post_to_dict(&post, true)?;
    let comments = ctx.comments.comments_payload(&post)?;

    if json {
        let payload = serde_json::json!({ "post": view, "comments": comments });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print_summary(&view);
    if let Some(content) = &view.content {
        println!();
        println!("{}", content);
    }

    println!();
    println!("{}", format!("Comments ({})", comments.total).bold().underline());
    if comments.items.is_empty() {
        println!("{}", "No comments yet.".dimmed());
    }
    for comment in &comments.items {
        println!(
            "  {} {}",
            comment.author.cyan(),
            comment.date_posted.format("%Y-%m-%d %H:%M").to_string().dimmed()
        );
        println!("    {}", comment.content);
    }
    Ok(())
}

fn list_posts(ctx: &AppContext, flair: Option<&str>) -> Result<()> {
    use colored::Colorize;

    let posts = match FlairQuery::parse(flair) {
        FlairQuery::Any => ctx.posts.list_posts(None)?,
        FlairQuery::Only(flair) => ctx.posts.list_posts(Some(flair))?,
        FlairQuery::Unknown => Vec::new(),
    };
    if posts.is_empty() {
        println!("{}", "No posts yet.".dimmed());
        return Ok(());
    }

    for post in &posts {
        print_summary(&ctx.posts.post_to_dict(post, false)?);
    }
    Ok(())
}

fn print_summary(view: &PostView) {
    use colored::Colorize;

    println!(
        "{:>4}  {}  {}",
        view.id.to_string().dimmed(),
        format!("[{}]", view.flair.label()).yellow(),
        view.title.bold()
    );
    println!(
        "      by {} on {} · {} comment{}",
        view.author.cyan(),
        view.date_posted.format("%Y-%m-%d %H:%M"),
        view.comments_count,
        if view.comments_count == 1 { "" } else { "s" }
    );
}
