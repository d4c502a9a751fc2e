//! JSON exporter for posts

use super::exporter::Exporter;
use crate::error::Result;
use crate::post::PostView;

/// Pretty-printed JSON array of fully projected posts
#[derive(Debug, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for JsonExporter {
    fn export(&self, posts: &[PostView]) -> Result<String> {
        Ok(serde_json::to_string_pretty(posts)?)
    }

    fn format_name(&self) -> &str {
        "json"
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Flair, PostId, UserId};
    use chrono::{TimeZone, Utc};

    fn post(title: &str) -> PostView {
        PostView {
            id: PostId(7),
            title: title.to_string(),
            flair: Flair::InjuryTalk,
            author: "bob".to_string(),
            user_id: UserId(2),
            date_posted: Utc.with_ymd_and_hms(2024, 11, 2, 9, 0, 0).unwrap(),
            comments_count: 4,
            content: Some("Questionable tag ahead of Sunday".to_string()),
        }
    }

    #[test]
    fn test_keeps_non_ascii() {
        let out = JsonExporter::new().export(&[post("Puka Nacua, señor IR?")]).unwrap();
        assert!(out.contains("Puka Nacua, señor IR?"));
        assert!(out.contains('\n'));
    }

    #[test]
    fn test_parses_back() {
        let out = JsonExporter::new().export(&[post("a"), post("b")]).unwrap();
        let parsed: Vec<PostView> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].content.as_deref(), Some("Questionable tag ahead of Sunday"));
    }

    #[test]
    fn test_empty_export() {
        assert_eq!(JsonExporter::new().export(&[]).unwrap(), "[]");
    }
}
