//! Post data models

use crate::types::{Flair, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A forum post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    /// Records written before flairs existed load as `OTHER`
    #[serde(default)]
    pub flair: Flair,
    pub date_posted: DateTime<Utc>,
    /// Author
    pub user_id: UserId,
}

impl Post {
    /// Newest first; equal timestamps fall back to the higher id
    pub fn newest_first(a: &Post, b: &Post) -> Ordering {
        b.date_posted
            .cmp(&a.date_posted)
            .then_with(|| b.id.cmp(&a.id))
    }

    /// Apply changes in place
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(flair) = changes.flair {
            self.flair = flair;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
    }
}

/// Data for a post about to be stored
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub flair: Flair,
    pub user_id: UserId,
    pub date_posted: DateTime<Utc>,
}

impl NewPost {
    /// Create a post stamped with the current time
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        flair: Flair,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            flair,
            user_id,
            date_posted: Utc::now(),
        }
    }

    /// Override the creation timestamp (imports, seeding)
    pub fn posted_at(mut self, date_posted: DateTime<Utc>) -> Self {
        self.date_posted = date_posted;
        self
    }
}

/// Author edits; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub flair: Option<Flair>,
    pub content: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.flair.is_none() && self.content.is_none()
    }
}

/// Predicate over posts: flair equality AND text search
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    flair: Option<Flair>,
    /// Lowercased needle
    search: Option<String>,
}

impl PostFilter {
    /// Match every post
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one flair
    pub fn with_flair(mut self, flair: Option<Flair>) -> Self {
        self.flair = flair;
        self
    }

    /// Case-insensitive substring search over title or content.
    /// Only empty text disables the search; whitespace is a real needle.
    pub fn with_search(mut self, text: Option<&str>) -> Self {
        self.search = text.filter(|t| !t.is_empty()).map(|t| t.to_lowercase());
        self
    }

    /// Evaluate the predicate
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(flair) = self.flair {
            if post.flair != flair {
                return false;
            }
        }
        match &self.search {
            Some(needle) => {
                post.title.to_lowercase().contains(needle)
                    || post.content.to_lowercase().contains(needle)
            }
            None => true,
        }
    }
}
