//! Store contract and the in-memory implementation
//!
//! The query services only talk to [`ForumStore`]. Filtering predicates are
//! built by the services ([`PostFilter`]) and evaluated by the store; ordering,
//! pagination and projection stay in the services.

mod data;
mod memory;

pub use data::{ForumData, IdCounters};
pub use memory::MemoryStore;

use crate::comment::{Comment, NewComment};
use crate::error::Result;
use crate::post::{NewPost, Post, PostChanges, PostFilter};
use crate::types::{PostId, UserId};
use crate::user::{NewUser, User};

/// Relational persistence for users, posts and comments
pub trait ForumStore: Send + Sync {
    /// Load a user by ID
    fn user(&self, id: UserId) -> Result<User>;

    /// Find a user by username or email
    fn find_user(&self, login: &str) -> Result<Option<User>>;

    /// List all users
    fn users(&self) -> Result<Vec<User>>;

    /// Register a user; duplicate username or email is a conflict
    fn insert_user(&self, user: NewUser) -> Result<User>;

    /// Load a post by ID
    fn post(&self, id: PostId) -> Result<Post>;

    /// All posts matching the filter, in no particular order
    fn posts(&self, filter: &PostFilter) -> Result<Vec<Post>>;

    /// Number of posts matching the filter
    fn count_posts(&self, filter: &PostFilter) -> Result<usize> {
        self.posts(filter).map(|posts| posts.len())
    }

    /// Store a new post
    fn insert_post(&self, post: NewPost) -> Result<Post>;

    /// Apply author edits to a post
    fn update_post(&self, id: PostId, changes: PostChanges) -> Result<Post>;

    /// Delete a post and its comments, returning the number of comments removed
    fn delete_post(&self, id: PostId) -> Result<usize>;

    /// Comments of a post, in no particular order
    fn comments_for(&self, post_id: PostId) -> Result<Vec<Comment>>;

    /// Number of comments on a post
    fn comment_count(&self, post_id: PostId) -> Result<usize> {
        self.comments_for(post_id).map(|comments| comments.len())
    }

    /// Store a new comment
    fn insert_comment(&self, comment: NewComment) -> Result<Comment>;
}
