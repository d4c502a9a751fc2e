//! Password credentials
//!
//! Passwords are stored as PHC strings produced by Argon2 with a random
//! 16-byte salt. Unknown logins and wrong passwords fail with the same
//! `Unauthorized` error.

use crate::error::{HuddleError, Result};
use crate::store::ForumStore;
use crate::user::{NewUser, User};
use crate::validation::ContentValidator;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;
use tracing::{debug, info};

/// Hash a plaintext password
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| HuddleError::Validation(format!("Cannot salt password: {}", e)))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HuddleError::Validation(format!("Cannot hash password: {}", e)))
}

/// Check a plaintext password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Validate and store a new member with a hashed password
pub fn register(
    store: &dyn ForumStore,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User> {
    let username = username.trim();
    let email = email.trim();
    let validator = ContentValidator::new();
    validator.validate_registration(username, email)?;
    validator.validate_password(password)?;

    let new = NewUser::new(username, email).with_password_hash(hash_password(password)?);
    let user = store.insert_user(new)?;
    info!("Registered user {} (id {})", user.username, user.id);
    Ok(user)
}

/// Resolve `login` (username or email) and check its password
pub fn authenticate(store: &dyn ForumStore, login: &str, password: &str) -> Result<User> {
    let rejected = || HuddleError::Unauthorized(format!("Invalid login or password for {}", login));

    let user = store.find_user(login)?.ok_or_else(rejected)?;
    if !verify_password(password, &user.password_hash) {
        debug!("Password rejected for {}", user.username);
        return Err(rejected());
    }
    Ok(user)
}
