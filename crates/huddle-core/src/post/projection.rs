//! Transport-shaped post records

use super::model::Post;
use crate::types::{Flair, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as returned by list, detail and export views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub title: String,
    pub flair: Flair,
    /// Author username
    pub author: String,
    pub user_id: UserId,
    #[serde(with = "crate::types::iso8601")]
    pub date_posted: DateTime<Utc>,
    pub comments_count: usize,
    /// Only present in detail and export views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PostView {
    pub fn new(post: &Post, author: &str, comments_count: usize, include_content: bool) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            flair: post.flair,
            author: author.to_string(),
            user_id: post.user_id,
            date_posted: post.date_posted,
            comments_count,
            content: include_content.then(|| post.content.clone()),
        }
    }
}

/// Per-flair post counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlairCounts {
    #[serde(rename = "TRADE_HELP")]
    pub trade_help: usize,
    #[serde(rename = "WAIVER_WIRE")]
    pub waiver_wire: usize,
    #[serde(rename = "INJURY_TALK")]
    pub injury_talk: usize,
    #[serde(rename = "OTHER")]
    pub other: usize,
    #[serde(rename = "TOTAL")]
    pub total: usize,
}

impl FlairCounts {
    /// Count one post
    pub fn add(&mut self, flair: Flair) {
        *self.bucket_mut(flair) += 1;
        self.total += 1;
    }

    pub fn get(&self, flair: Flair) -> usize {
        match flair {
            Flair::TradeHelp => self.trade_help,
            Flair::WaiverWire => self.waiver_wire,
            Flair::InjuryTalk => self.injury_talk,
            Flair::Other => self.other,
        }
    }

    fn bucket_mut(&mut self, flair: Flair) -> &mut usize {
        match flair {
            Flair::TradeHelp => &mut self.trade_help,
            Flair::WaiverWire => &mut self.waiver_wire,
            Flair::InjuryTalk => &mut self.injury_talk,
            Flair::Other => &mut self.other,
        }
    }
}

impl<'a> FromIterator<&'a Post> for FlairCounts {
    fn from_iter<I: IntoIterator<Item = &'a Post>>(iter: I) -> Self {
        let mut counts = FlairCounts::default();
        for post in iter {
            counts.add(post.flair);
        }
        counts
    }
}

/// Dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsPayload {
    pub counts: FlairCounts,
    /// Most recent posts, newest first, without content
    pub latest: Vec<PostView>,
}
