//! API command
//!
//! JSON views of the forum, shaped exactly like the HTTP API payloads.

use super::context::{AppContext, Globals};
use anyhow::Result;
use clap::Subcommand;
use huddle_core::post::{Page, PostView};
use huddle_core::types::{FlairQuery, PostId};
use serde::Serialize;

/// API subcommands
#[derive(Debug, Subcommand)]
pub enum ApiCommand {
    /// Paged post listing
    Posts {
        /// Only posts with this flair (exact name; unknown names match nothing)
        #[arg(long)]
        flair: Option<String>,

        /// Case-insensitive search over title and content
        #[arg(long)]
        q: Option<String>,

        /// Page number (defaults to 1)
        #[arg(long)]
        page: Option<String>,

        /// Page size (clamped to the configured maximum)
        #[arg(long)]
        per_page: Option<String>,
    },

    /// One post with content
    Post {
        /// Post ID
        id: String,
    },

    /// Comments of a post
    Comments {
        /// Post ID
        id: String,
    },

    /// Per-flair counts and latest posts
    Stats,

    /// Liveness check
    Health,
}

impl ApiCommand {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ApiCommand::Posts { .. } => "api_posts",
            ApiCommand::Post { .. } => "api_post_detail",
            ApiCommand::Comments { .. } => "api_post_comments",
            ApiCommand::Stats => "api_stats",
            ApiCommand::Health => "api_health",
        }
    }
}

/// Listing payload: the page plus the echoed filters
#[derive(Debug, Serialize)]
pub struct PostsResponse {
    #[serde(flatten)]
    pub page: Page<PostView>,
    pub flair: Option<String>,
    pub q: String,
}

/// Execute the api command
pub fn execute(cmd: ApiCommand, globals: &Globals) -> Result<()> {
    if let ApiCommand::Health = cmd {
        return emit(&serde_json::json!({ "status": "ok" }));
    }

    let ctx = globals.open()?;
    match cmd {
        ApiCommand::Posts {
            flair,
            q,
            page,
            per_page,
        } => emit(&posts_response(&ctx, flair, q, page.as_deref(), per_page.as_deref())?),
        ApiCommand::Post { id } => emit(&ctx.posts.post_detail(id.parse::<PostId>()?)?),
        ApiCommand::Comments { id } => {
            let post = ctx.posts.get_post(id.parse::<PostId>()?)?;
            emit(&ctx.comments.comments_payload(&post)?)
        }
        ApiCommand::Stats => emit(&ctx.posts.stats_payload()?),
        ApiCommand::Health => Ok(()),
    }
}

/// Build the `/api/posts` payload from raw query values
pub fn posts_response(
    ctx: &AppContext,
    flair: Option<String>,
    q: Option<String>,
    page: Option<&str>,
    per_page: Option<&str>,
) -> Result<PostsResponse> {
    let request = ctx.page_request(page, per_page);
    let q = q.unwrap_or_default();

    let posts = match FlairQuery::parse(flair.as_deref()) {
        FlairQuery::Any => ctx.posts.paginate_posts(None, Some(&q), request)?,
        FlairQuery::Only(only) => ctx.posts.paginate_posts(Some(only), Some(&q), request)?,
        FlairQuery::Unknown => Page::slice(Vec::new(), request),
    };
    let page = ctx.posts.page_to_dicts(posts, false)?;
    Ok(PostsResponse { page, flair, q })
}

fn emit<T: Serialize>(payload: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}
