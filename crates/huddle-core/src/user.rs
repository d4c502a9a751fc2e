//! Forum members

use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered forum member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique display name
    pub username: String,
    /// Unique contact address
    pub email: String,
    /// PHC-format Argon2 hash; empty for accounts that cannot log in
    #[serde(default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether `login` names this user, by username or email
    pub fn matches_login(&self, login: &str) -> bool {
        self.username == login || self.email.eq_ignore_ascii_case(login)
    }
}

/// Public view of a member, without credentials
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Registration data for a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Attach an already hashed password
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = hash.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: UserId(1),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_matches_login() {
        let user = alice();
        assert!(user.matches_login("alice"));
        assert!(user.matches_login("ALICE@example.com"));
        assert!(!user.matches_login("bob"));
    }

    #[test]
    fn test_view_hides_password_hash() {
        let json = serde_json::to_value(UserView::from(&alice())).unwrap();
        assert_eq!(json["username"], "alice");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_legacy_record_without_hash() {
        let json = r#"{"id":3,"username":"old","email":"old@example.com","created_at":"2024-01-01T00:00:00Z"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.password_hash.is_empty());
    }
}
