//! Comment listings for a post

use super::model::{Comment, CommentListing, CommentView, NewComment};
use crate::error::Result;
use crate::post::Post;
use crate::store::ForumStore;
use crate::types::UserId;
use crate::user::User;
use crate::validation::ContentValidator;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Assembles and appends comment threads
pub struct CommentAggregator {
    store: Arc<dyn ForumStore>,
    validator: ContentValidator,
}

impl CommentAggregator {
    pub fn new(store: Arc<dyn ForumStore>) -> Self {
        Self {
            store,
            validator: ContentValidator::new(),
        }
    }

    /// Comments of `post`, oldest first
    pub fn comments_payload(&self, post: &Post) -> Result<CommentListing> {
        let mut comments = self.store.comments_for(post.id)?;
        comments.sort_by(Comment::oldest_first);

        let mut authors: HashMap<UserId, String> = HashMap::new();
        let mut items = Vec::with_capacity(comments.len());
        for comment in &comments {
            if !authors.contains_key(&comment.user_id) {
                let user = self.store.user(comment.user_id)?;
                authors.insert(user.id, user.username);
            }
            items.push(CommentView::new(comment, &authors[&comment.user_id]));
        }

        Ok(CommentListing::from(items))
    }

    /// Reply to a post
    pub fn add_comment(&self, post: &Post, author: &User, content: &str) -> Result<Comment> {
        self.validator.validate_content(content)?;

        let comment = self
            .store
            .insert_comment(NewComment::new(post.id, author.id, content))?;
        info!("User {} commented on post {}", author.username, post.id);
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HuddleError;
    use crate::post::NewPost;
    use crate::store::MemoryStore;
    use crate::types::Flair;
    use crate::user::NewUser;
    use chrono::{Duration, TimeZone, Utc};

    fn setup() -> (CommentAggregator, Arc<MemoryStore>, Post, User, User) {
        let store = Arc::new(MemoryStore::new());
        let alice = store
            .insert_user(NewUser::new("alice", "alice@example.com"))
            .unwrap();
        let bob = store
            .insert_user(NewUser::new("bob", "bob@example.com"))
            .unwrap();
        let post = store
            .insert_post(NewPost::new(alice.id, "Hello", Flair::Other, "Test content"))
            .unwrap();
        (CommentAggregator::new(store.clone()), store, post, alice, bob)
    }

    #[test]
    fn test_comments_oldest_first() {
        let (aggregator, store, post, alice, bob) = setup();
        let t0 = Utc.with_ymd_and_hms(2024, 9, 8, 20, 15, 0).unwrap();

        store
            .insert_comment(NewComment::new(post.id, bob.id, "late").posted_at(t0 + Duration::minutes(5)))
            .unwrap();
        store
            .insert_comment(NewComment::new(post.id, alice.id, "early").posted_at(t0))
            .unwrap();
        store
            .insert_comment(NewComment::new(post.id, bob.id, "same time").posted_at(t0))
            .unwrap();

        let listing = aggregator.comments_payload(&post).unwrap();
        let contents: Vec<&str> = listing.items.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["early", "same time", "late"]);
        assert_eq!(listing.total, 3);
        assert_eq!(listing.items[0].author, "alice");
        assert_eq!(listing.items[1].author, "bob");
        assert!(listing
            .items
            .windows(2)
            .all(|w| w[0].date_posted <= w[1].date_posted));
    }

    #[test]
    fn test_comments_only_for_this_post() {
        let (aggregator, store, post, alice, _) = setup();
        let other = store
            .insert_post(NewPost::new(alice.id, "Other", Flair::TradeHelp, "..."))
            .unwrap();
        aggregator.add_comment(&other, &alice, "elsewhere").unwrap();

        let listing = aggregator.comments_payload(&post).unwrap();
        assert_eq!(listing.total, 0);
        assert!(listing.items.is_empty());
    }

    #[test]
    fn test_add_comment() {
        let (aggregator, _, post, _, bob) = setup();
        let comment = aggregator.add_comment(&post, &bob, "First!").unwrap();
        assert_eq!(comment.post_id, post.id);
        assert_eq!(comment.user_id, bob.id);

        let listing = aggregator.comments_payload(&post).unwrap();
        assert_eq!(listing.total, 1);
        assert_eq!(listing.items[0].content, "First!");
    }

    #[test]
    fn test_add_empty_comment_rejected() {
        let (aggregator, _, post, _, bob) = setup();
        let err = aggregator.add_comment(&post, &bob, "  ").unwrap_err();
        assert!(matches!(err, HuddleError::Validation(_)));
    }
}
