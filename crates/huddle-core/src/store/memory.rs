//! In-memory forum store

use super::data::ForumData;
use super::ForumStore;
use crate::comment::{Comment, NewComment};
use crate::error::{HuddleError, Result};
use crate::post::{NewPost, Post, PostChanges, PostFilter};
use crate::types::{PostId, UserId};
use crate::user::{NewUser, User};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Store that keeps everything in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<ForumData>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ForumData>> {
        self.data
            .read()
            .map_err(|_| HuddleError::Store("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ForumData>> {
        self.data
            .write()
            .map_err(|_| HuddleError::Store("memory store lock poisoned".to_string()))
    }
}

impl ForumStore for MemoryStore {
    fn user(&self, id: UserId) -> Result<User> {
        self.read()?.user(id).cloned()
    }

    fn find_user(&self, login: &str) -> Result<Option<User>> {
        Ok(self.read()?.find_user(login).cloned())
    }

    fn users(&self) -> Result<Vec<User>> {
        Ok(self.read()?.users().to_vec())
    }

    fn insert_user(&self, user: NewUser) -> Result<User> {
        self.write()?.insert_user(user)
    }

    fn post(&self, id: PostId) -> Result<Post> {
        self.read()?.post(id).cloned()
    }

    fn posts(&self, filter: &PostFilter) -> Result<Vec<Post>> {
        Ok(self.read()?.posts(filter))
    }

    fn count_posts(&self, filter: &PostFilter) -> Result<usize> {
        Ok(self.read()?.count_posts(filter))
    }

    fn insert_post(&self, post: NewPost) -> Result<Post> {
        self.write()?.insert_post(post)
    }

    fn update_post(&self, id: PostId, changes: PostChanges) -> Result<Post> {
        self.write()?.update_post(id, changes)
    }

    fn delete_post(&self, id: PostId) -> Result<usize> {
        self.write()?.delete_post(id)
    }

    fn comments_for(&self, post_id: PostId) -> Result<Vec<Comment>> {
        Ok(self.read()?.comments_for(post_id))
    }

    fn comment_count(&self, post_id: PostId) -> Result<usize> {
        Ok(self.read()?.comment_count(post_id))
    }

    fn insert_comment(&self, comment: NewComment) -> Result<Comment> {
        self.write()?.insert_comment(comment)
    }
}
