//! Field validation for forum writes

use crate::error::{HuddleError, Result};

/// Maximum post title length
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum username length
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Maximum email length
pub const MAX_EMAIL_LENGTH: usize = 120;

/// Validator for user-supplied text
pub struct ContentValidator {
    max_title_length: usize,
}

impl ContentValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_title_length: MAX_TITLE_LENGTH,
        }
    }

    /// Validate a post title
    pub fn validate_title(&self, title: &str) -> Result<()> {
        let trimmed = title.trim();

        if trimmed.is_empty() {
            return Err(HuddleError::Validation(
                "Post title cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > self.max_title_length {
            return Err(HuddleError::Validation(format!(
                "Post title exceeds maximum length of {} characters",
                self.max_title_length
            )));
        }

        Ok(())
    }

    /// Validate post or comment body
    pub fn validate_content(&self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(HuddleError::Validation(
                "Content cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate a new password
    pub fn validate_password(&self, password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(HuddleError::Validation(
                "Password cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate registration fields
    pub fn validate_registration(&self, username: &str, email: &str) -> Result<()> {
        let username = username.trim();
        if username.is_empty() || username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(HuddleError::Validation(format!(
                "Username must be between 1 and {} characters",
                MAX_USERNAME_LENGTH
            )));
        }

        let email = email.trim();
        if email.len() > MAX_EMAIL_LENGTH {
            return Err(HuddleError::Validation(format!(
                "Email exceeds maximum length of {} characters",
                MAX_EMAIL_LENGTH
            )));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(HuddleError::Validation(format!(
                "Invalid email address: {}",
                email
            ))),
        }
    }
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self::new()
    }
}
