//! Table set shared by the store implementations

use crate::comment::{Comment, NewComment};
use crate::error::{HuddleError, Result};
use crate::post::{NewPost, Post, PostChanges, PostFilter};
use crate::types::{CommentId, PostId, UserId};
use crate::user::{NewUser, User};
use serde::{Deserialize, Serialize};

/// Highest ids handed out so far; ids are never reused after a delete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdCounters {
    pub user: i64,
    pub post: i64,
    pub comment: i64,
}

/// Users, posts and comments with their foreign-key rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumData {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    last_ids: IdCounters,
}

impl ForumData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: UserId) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or(HuddleError::UserNotFound(id))
    }

    /// Look up by username or email
    pub fn find_user(&self, login: &str) -> Option<&User> {
        self.users.iter().find(|u| u.matches_login(login))
    }

    pub fn insert_user(&mut self, new: NewUser) -> Result<User> {
        if self.users.iter().any(|u| u.username == new.username) {
            return Err(HuddleError::Conflict(format!(
                "Username already taken: {}",
                new.username
            )));
        }
        if self.users.iter().any(|u| u.email.eq_ignore_ascii_case(&new.email)) {
            return Err(HuddleError::Conflict(format!(
                "Email already registered: {}",
                new.email
            )));
        }

        let id = UserId(next_id(
            &mut self.last_ids.user,
            self.users.iter().map(|u| u.id.0),
        ));
        let user = User {
            id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            created_at: new.created_at,
        };
        self.users.push(user.clone());
        Ok(user)
    }

    pub fn post(&self, id: PostId) -> Result<&Post> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .ok_or(HuddleError::PostNotFound(id))
    }

    /// Posts matching the filter, in insertion order
    pub fn posts(&self, filter: &PostFilter) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub fn count_posts(&self, filter: &PostFilter) -> usize {
        self.posts.iter().filter(|p| filter.matches(p)).count()
    }

    pub fn insert_post(&mut self, new: NewPost) -> Result<Post> {
        self.user(new.user_id)?;

        let id = PostId(next_id(
            &mut self.last_ids.post,
            self.posts.iter().map(|p| p.id.0),
        ));
        let post = Post {
            id,
            title: new.title,
            content: new.content,
            flair: new.flair,
            date_posted: new.date_posted,
            user_id: new.user_id,
        };
        self.posts.push(post.clone());
        Ok(post)
    }

    pub fn update_post(&mut self, id: PostId, changes: PostChanges) -> Result<Post> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(HuddleError::PostNotFound(id))?;
        post.apply(changes);
        Ok(post.clone())
    }

    /// Remove a post and its comments; returns the number of comments removed
    pub fn delete_post(&mut self, id: PostId) -> Result<usize> {
        let index = self
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(HuddleError::PostNotFound(id))?;
        self.posts.remove(index);

        let before = self.comments.len();
        self.comments.retain(|c| c.post_id != id);
        Ok(before - self.comments.len())
    }

    pub fn comments_for(&self, post_id: PostId) -> Vec<Comment> {
        self.comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    pub fn comment_count(&self, post_id: PostId) -> usize {
        self.comments.iter().filter(|c| c.post_id == post_id).count()
    }

    pub fn insert_comment(&mut self, new: NewComment) -> Result<Comment> {
        self.post(new.post_id)?;
        self.user(new.user_id)?;

        let id = CommentId(next_id(
            &mut self.last_ids.comment,
            self.comments.iter().map(|c| c.id.0),
        ));
        let comment = Comment {
            id,
            content: new.content,
            date_posted: new.date_posted,
            post_id: new.post_id,
            user_id: new.user_id,
        };
        self.comments.push(comment.clone());
        Ok(comment)
    }
}

/// Bump the counter past every existing id (covers hand-edited data files)
fn next_id(counter: &mut i64, existing: impl Iterator<Item = i64>) -> i64 {
    let highest = existing.max().unwrap_or(0).max(*counter);
    *counter = highest + 1;
    *counter
}
