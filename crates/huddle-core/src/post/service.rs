//! Post queries, projections and author-only writes

use super::model::{NewPost, Post, PostChanges, PostFilter};
use super::page::{Page, PageRequest};
use super::projection::{FlairCounts, PostView, StatsPayload};
use crate::error::{HuddleError, Result};
use crate::store::ForumStore;
use crate::types::{Flair, PostId, UserId};
use crate::user::User;
use crate::validation::ContentValidator;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Default number of posts in the stats payload
pub const DEFAULT_LATEST_LIMIT: usize = 5;

/// Read and write operations over posts
pub struct PostService {
    store: Arc<dyn ForumStore>,
    latest_limit: usize,
    validator: ContentValidator,
}

impl PostService {
    /// Create a service over the given store
    pub fn new(store: Arc<dyn ForumStore>) -> Self {
        Self {
            store,
            latest_limit: DEFAULT_LATEST_LIMIT,
            validator: ContentValidator::new(),
        }
    }

    /// Set how many posts `stats_payload` lists
    pub fn with_latest_limit(mut self, limit: usize) -> Self {
        self.latest_limit = limit;
        self
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn ForumStore> {
        &self.store
    }

    /// All posts, optionally of one flair, newest first
    pub fn list_posts(&self, flair: Option<Flair>) -> Result<Vec<Post>> {
        self.ordered(&PostFilter::all().with_flair(flair))
    }

    /// Filtered, searched and paged posts, newest first.
    ///
    /// A page past the end yields no items but still reports the real
    /// `pages` and `total`.
    pub fn paginate_posts(
        &self,
        flair: Option<Flair>,
        search: Option<&str>,
        request: PageRequest,
    ) -> Result<Page<Post>> {
        let filter = PostFilter::all().with_flair(flair).with_search(search);
        let posts = self.ordered(&filter)?;
        Ok(Page::slice(posts, request))
    }

    /// Load one post
    pub fn get_post(&self, id: PostId) -> Result<Post> {
        self.store.post(id).inspect_err(|e| {
            if e.is_not_found() {
                debug!("Post {} requested but not found", id);
            }
        })
    }

    /// Project a post for transport
    pub fn post_to_dict(&self, post: &Post, include_content: bool) -> Result<PostView> {
        Projector::new(self.store.as_ref()).view(post, include_content)
    }

    /// Project a page of posts, keeping the page arithmetic
    pub fn page_to_dicts(&self, page: Page<Post>, include_content: bool) -> Result<Page<PostView>> {
        let mut projector = Projector::new(self.store.as_ref());
        page.try_map(|post| projector.view(&post, include_content))
    }

    /// Full projection of one post
    pub fn post_detail(&self, id: PostId) -> Result<PostView> {
        let post = self.get_post(id)?;
        self.post_to_dict(&post, true)
    }

    /// Per-flair counts and the most recent posts
    pub fn stats_payload(&self) -> Result<StatsPayload> {
        let posts = self.ordered(&PostFilter::all())?;
        let counts: FlairCounts = posts.iter().collect();

        let mut projector = Projector::new(self.store.as_ref());
        let latest = posts
            .iter()
            .take(self.latest_limit)
            .map(|post| projector.view(post, false))
            .collect::<Result<Vec<_>>>()?;

        Ok(StatsPayload { counts, latest })
    }

    /// Every post, newest first, with content
    pub fn export_posts_data(&self) -> Result<Vec<PostView>> {
        let posts = self.ordered(&PostFilter::all())?;
        let mut projector = Projector::new(self.store.as_ref());
        posts
            .iter()
            .map(|post| projector.view(post, true))
            .collect()
    }

    /// Publish a new post
    pub fn create_post(
        &self,
        author: &User,
        title: &str,
        flair: Flair,
        content: &str,
    ) -> Result<Post> {
        self.validator.validate_title(title)?;
        self.validator.validate_content(content)?;

        let post = self
            .store
            .insert_post(NewPost::new(author.id, title.trim(), flair, content))?;
        info!("User {} published post {}", author.username, post.id);
        Ok(post)
    }

    /// Edit a post; only its author may do so
    pub fn update_post(&self, id: PostId, editor: &User, changes: PostChanges) -> Result<Post> {
        let post = self.editable_post(id, editor)?;

        if let Some(title) = &changes.title {
            self.validator.validate_title(title)?;
        }
        if let Some(content) = &changes.content {
            self.validator.validate_content(content)?;
        }
        if changes.is_empty() {
            return Ok(post);
        }

        let changes = PostChanges {
            title: changes.title.map(|t| t.trim().to_string()),
            ..changes
        };
        let updated = self.store.update_post(id, changes)?;
        info!("User {} updated post {}", editor.username, id);
        Ok(updated)
    }

    /// Load a post `editor` is allowed to change
    pub fn editable_post(&self, id: PostId, editor: &User) -> Result<Post> {
        let post = self.get_post(id)?;
        ensure_author(&post, editor)?;
        Ok(post)
    }

    /// Delete a post and its comments; only its author may do so
    pub fn delete_post(&self, id: PostId, editor: &User) -> Result<usize> {
        self.editable_post(id, editor)?;

        let removed = self.store.delete_post(id)?;
        info!(
            "User {} deleted post {} ({} comments removed)",
            editor.username, id, removed
        );
        Ok(removed)
    }

    fn ordered(&self, filter: &PostFilter) -> Result<Vec<Post>> {
        let mut posts = self.store.posts(filter)?;
        posts.sort_by(Post::newest_first);
        Ok(posts)
    }
}

fn ensure_author(post: &Post, editor: &User) -> Result<()> {
    if post.user_id != editor.id {
        return Err(HuddleError::Forbidden(format!(
            "{} is not the author of post {}",
            editor.username, post.id
        )));
    }
    Ok(())
}

/// Projects posts, remembering author names for the duration of one call
struct Projector<'a> {
    store: &'a dyn ForumStore,
    authors: HashMap<UserId, String>,
}

impl<'a> Projector<'a> {
    fn new(store: &'a dyn ForumStore) -> Self {
        Self {
            store,
            authors: HashMap::new(),
        }
    }

    fn view(&mut self, post: &Post, include_content: bool) -> Result<PostView> {
        let author = match self.authors.get(&post.user_id) {
            Some(name) => name.clone(),
            None => {
                let name = self.store.user(post.user_id)?.username;
                self.authors.insert(post.user_id, name.clone());
                name
            }
        };
        let comments_count = self.store.comment_count(post.id)?;
        Ok(PostView::new(post, &author, comments_count, include_content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::NewComment;
    use crate::config::PaginationConfig;
    use crate::store::MemoryStore;
    use crate::user::NewUser;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    struct Fixture {
        service: PostService,
        store: Arc<MemoryStore>,
        alice: User,
        bob: User,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let alice = store
            .insert_user(NewUser::new("alice", "alice@example.com"))
            .unwrap();
        let bob = store
            .insert_user(NewUser::new("bob", "bob@example.com"))
            .unwrap();
        let service = PostService::new(store.clone());
        Fixture {
            service,
            store,
            alice,
            bob,
        }
    }

    impl Fixture {
        /// Insert posts one minute apart, oldest first
        fn seed(&self, posts: &[(&str, Flair, &str)]) -> Vec<Post> {
            let start = Utc.with_ymd_and_hms(2024, 9, 8, 13, 0, 0).unwrap();
            posts
                .iter()
                .enumerate()
                .map(|(i, (title, flair, content))| {
                    let new = NewPost::new(self.alice.id, *title, *flair, *content)
                        .posted_at(start + Duration::minutes(i as i64));
                    self.store.insert_post(new).unwrap()
                })
                .collect()
        }
    }

    fn req(page: i64, per_page: i64) -> PageRequest {
        PageRequest::new(page, per_page, &PaginationConfig::default())
    }

    fn ids(posts: &[Post]) -> Vec<i64> {
        posts.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_list_posts_newest_first() {
        let f = fixture();
        f.seed(&[
            ("one", Flair::Other, "a"),
            ("two", Flair::TradeHelp, "b"),
            ("three", Flair::Other, "c"),
        ]);

        assert_eq!(ids(&f.service.list_posts(None).unwrap()), vec![3, 2, 1]);
        assert_eq!(
            ids(&f.service.list_posts(Some(Flair::Other)).unwrap()),
            vec![3, 1]
        );
        assert!(f.service.list_posts(Some(Flair::InjuryTalk)).unwrap().is_empty());
    }

    #[test]
    fn test_paginate_by_flair() {
        let f = fixture();
        f.seed(&[
            ("a", Flair::Other, "x"),
            ("b", Flair::Other, "y"),
            ("c", Flair::TradeHelp, "z"),
        ]);

        let page = f
            .service
            .paginate_posts(Some(Flair::Other), Some(""), req(1, 10))
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 2);
        assert_eq!(page.pages, 1);
    }

    #[test]
    fn test_paginate_second_page() {
        let f = fixture();
        f.seed(&[
            ("a", Flair::Other, "x"),
            ("b", Flair::Other, "y"),
            ("c", Flair::TradeHelp, "z"),
        ]);

        let page = f.service.paginate_posts(None, None, req(2, 2)).unwrap();
        assert_eq!(ids(&page.items), vec![1]);
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, 2);
    }

    #[test]
    fn test_paginate_past_the_end() {
        let f = fixture();
        f.seed(&[("a", Flair::Other, "x")]);

        let page = f.service.paginate_posts(None, None, req(5, 10)).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
        assert_eq!(page.pages, 1);
    }

    #[test]
    fn test_paginate_search_title_or_content() {
        let f = fixture();
        f.seed(&[
            ("Bijan buy-low?", Flair::TradeHelp, "Thinking about it"),
            ("Week 3 pickups", Flair::WaiverWire, "Is BIJAN droppable? lol"),
            ("Hamstring news", Flair::InjuryTalk, "Out 2 weeks"),
        ]);

        let page = f.service.paginate_posts(None, Some("bijan"), req(1, 10)).unwrap();
        assert_eq!(ids(&page.items), vec![2, 1]);
        assert_eq!(page.total, 2);

        let page = f
            .service
            .paginate_posts(Some(Flair::TradeHelp), Some("bijan"), req(1, 10))
            .unwrap();
        assert_eq!(ids(&page.items), vec![1]);
    }

    #[test]
    fn test_paginate_whitespace_search_is_not_ignored() {
        let f = fixture();
        f.seed(&[
            ("two  spaces", Flair::Other, "x"),
            ("single space", Flair::Other, "y"),
        ]);

        let page = f.service.paginate_posts(None, Some("  "), req(1, 10)).unwrap();
        assert_eq!(ids(&page.items), vec![1]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_pages_tile_the_listing() {
        let f = fixture();
        let specs: Vec<(String, Flair)> = (0..6)
            .map(|i| (format!("post {}", i), Flair::Other))
            .collect();
        let borrowed: Vec<(&str, Flair, &str)> =
            specs.iter().map(|(t, fl)| (t.as_str(), *fl, "body")).collect();
        f.seed(&borrowed);

        let full = ids(&f.service.list_posts(None).unwrap());
        let mut tiled = Vec::new();
        for n in 1..=3 {
            let page = f.service.paginate_posts(None, None, req(n, 2)).unwrap();
            assert_eq!(page.total, 6);
            assert_eq!(page.pages, 3);
            tiled.extend(ids(&page.items));
        }
        assert_eq!(tiled, full);
    }

    #[test]
    fn test_empty_store() {
        let f = fixture();
        let page = f.service.paginate_posts(None, None, req(1, 10)).unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.pages, 0);

        let stats = f.service.stats_payload().unwrap();
        assert_eq!(stats.counts, FlairCounts::default());
        assert!(stats.latest.is_empty());
        assert!(f.service.export_posts_data().unwrap().is_empty());
    }

    #[test]
    fn test_detail_not_found() {
        let f = fixture();
        let err = f.service.post_detail(PostId(404)).unwrap_err();
        assert!(matches!(err, HuddleError::PostNotFound(PostId(404))));
    }

    #[test]
    fn test_post_to_dict() {
        let f = fixture();
        let post = f.seed(&[("Hello", Flair::Other, "Test content")]).remove(0);
        f.store
            .insert_comment(NewComment::new(post.id, f.bob.id, "First!"))
            .unwrap();

        let view = f.service.post_to_dict(&post, false).unwrap();
        assert_eq!(view.author, "alice");
        assert_eq!(view.user_id, f.alice.id);
        assert_eq!(view.comments_count, 1);
        assert_eq!(view.content, None);

        let detail = f.service.post_detail(post.id).unwrap();
        assert_eq!(detail.content.as_deref(), Some("Test content"));
    }

    #[test]
    fn test_stats_payload() {
        let f = fixture();
        f.seed(&[
            ("1", Flair::Other, "x"),
            ("2", Flair::TradeHelp, "x"),
            ("3", Flair::WaiverWire, "x"),
            ("4", Flair::InjuryTalk, "x"),
            ("5", Flair::Other, "x"),
            ("6", Flair::TradeHelp, "x"),
            ("7", Flair::Other, "x"),
        ]);

        let stats = f.service.stats_payload().unwrap();
        assert_eq!(stats.counts.get(Flair::Other), 3);
        assert_eq!(stats.counts.get(Flair::TradeHelp), 2);
        assert_eq!(stats.counts.get(Flair::WaiverWire), 1);
        assert_eq!(stats.counts.get(Flair::InjuryTalk), 1);
        assert_eq!(stats.counts.total, 7);

        let latest: Vec<i64> = stats.latest.iter().map(|v| v.id.0).collect();
        assert_eq!(latest, vec![7, 6, 5, 4, 3]);
        assert!(stats.latest.iter().all(|v| v.content.is_none()));
    }

    #[test]
    fn test_stats_latest_limit() {
        let f = fixture();
        f.seed(&[("1", Flair::Other, "x"), ("2", Flair::Other, "x")]);

        let service = PostService::new(f.store.clone()).with_latest_limit(1);
        assert_eq!(service.stats_payload().unwrap().latest.len(), 1);
        assert_eq!(f.service.stats_payload().unwrap().latest.len(), 2);
    }

    #[test]
    fn test_export_posts_data() {
        let f = fixture();
        f.seed(&[("old", Flair::Other, "first"), ("new", Flair::InjuryTalk, "second")]);

        let export = f.service.export_posts_data().unwrap();
        let titles: Vec<&str> = export.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old"]);
        assert_eq!(export[0].content.as_deref(), Some("second"));
    }

    #[test]
    fn test_create_post_validates() {
        let f = fixture();
        let post = f
            .service
            .create_post(&f.alice, "  Start Jordan Addison? ", Flair::Other, "Flex spot")
            .unwrap();
        assert_eq!(post.title, "Start Jordan Addison?");

        let err = f
            .service
            .create_post(&f.alice, "", Flair::Other, "body")
            .unwrap_err();
        assert!(matches!(err, HuddleError::Validation(_)));
    }

    #[test]
    fn test_only_author_can_edit_or_delete() {
        let f = fixture();
        let post = f.seed(&[("mine", Flair::Other, "body")]).remove(0);

        let changes = PostChanges {
            flair: Some(Flair::WaiverWire),
            ..Default::default()
        };
        let err = f
            .service
            .update_post(post.id, &f.bob, changes.clone())
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        let updated = f.service.update_post(post.id, &f.alice, changes).unwrap();
        assert_eq!(updated.flair, Flair::WaiverWire);

        assert!(f.service.delete_post(post.id, &f.bob).is_err());
        f.store
            .insert_comment(NewComment::new(post.id, f.bob.id, "nice"))
            .unwrap();
        assert_eq!(f.service.delete_post(post.id, &f.alice).unwrap(), 1);
        assert!(f.service.get_post(post.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_editable_post_checks_author() {
        let f = fixture();
        let post = f.seed(&[("mine", Flair::Other, "body")]).remove(0);

        let err = f.service.editable_post(post.id, &f.bob).unwrap_err();
        assert!(matches!(err, HuddleError::Forbidden(_)));
        assert_eq!(f.service.editable_post(post.id, &f.alice).unwrap().title, "mine");
        assert!(f
            .service
            .editable_post(PostId(99), &f.alice)
            .unwrap_err()
            .is_not_found());
        // the refused lookup leaves the post in place
        assert!(f.service.get_post(post.id).is_ok());
    }
}
