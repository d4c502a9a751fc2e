//! Comment data models

use crate::types::{CommentId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A reply attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub date_posted: DateTime<Utc>,
    pub post_id: PostId,
    /// Author
    pub user_id: UserId,
}

impl Comment {
    /// Conversational order: oldest first, then by id
    pub fn oldest_first(a: &Comment, b: &Comment) -> Ordering {
        a.date_posted
            .cmp(&b.date_posted)
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// Data for a comment about to be stored
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub post_id: PostId,
    pub user_id: UserId,
    pub date_posted: DateTime<Utc>,
}

impl NewComment {
    pub fn new(post_id: PostId, user_id: UserId, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            post_id,
            user_id,
            date_posted: Utc::now(),
        }
    }

    /// Override the creation timestamp
    pub fn posted_at(mut self, date_posted: DateTime<Utc>) -> Self {
        self.date_posted = date_posted;
        self
    }
}

/// A comment as returned by the comments listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: CommentId,
    pub post_id: PostId,
    /// Author username
    pub author: String,
    pub user_id: UserId,
    pub content: String,
    #[serde(with = "crate::types::iso8601")]
    pub date_posted: DateTime<Utc>,
}

impl CommentView {
    pub fn new(comment: &Comment, author: &str) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            author: author.to_string(),
            user_id: comment.user_id,
            content: comment.content.clone(),
            date_posted: comment.date_posted,
        }
    }
}

/// All comments of one post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentListing {
    pub items: Vec<CommentView>,
    pub total: usize,
}

impl From<Vec<CommentView>> for CommentListing {
    fn from(items: Vec<CommentView>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}
