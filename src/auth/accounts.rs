//! Registration and credential checks, shared by the HTTP handlers and the
//! integration tests.

use crate::auth::password;
use crate::db::models::User;
use crate::db::{users, StoreError};
use crate::state::DbPool;

pub const MIN_USERNAME_LEN: usize = 2;
pub const MAX_USERNAME_LEN: usize = 20;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("That username is already taken")]
    DuplicateUsername,

    #[error("That email is already registered")]
    DuplicateEmail,

    /// One message per field that failed validation.
    #[error("Invalid registration")]
    Validation(Vec<String>),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Store(StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Deliberately generic: never reveals whether the email or the
    /// password was wrong.
    #[error("Login unsuccessful. Please check email and password")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn validate(username: &str, email: &str, password: &str, confirm: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if username.len() < MIN_USERNAME_LEN || username.len() > MAX_USERNAME_LEN {
        errors.push(format!(
            "Username must be between {} and {} characters",
            MIN_USERNAME_LEN, MAX_USERNAME_LEN
        ));
    }
    if !email.contains('@') || !email.contains('.') {
        errors.push("Enter a valid email address".to_string());
    }
    if password.len() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    if password != confirm {
        errors.push("Passwords do not match".to_string());
    }

    errors
}

/// Create a new account. The raw password is hashed before it touches the
/// database; the plaintext is never stored. Returns the new user id.
pub fn register(
    pool: &DbPool,
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<String, RegisterError> {
    let username = username.trim();
    let email = email.trim();

    let errors = validate(username, email, password, confirm);
    if !errors.is_empty() {
        return Err(RegisterError::Validation(errors));
    }

    let hash = password::hash_password(password)?;

    match users::create_user(pool, username, email, &hash) {
        Ok(id) => Ok(id),
        Err(StoreError::DuplicateUsername) => Err(RegisterError::DuplicateUsername),
        Err(StoreError::DuplicateEmail) => Err(RegisterError::DuplicateEmail),
        Err(other) => Err(RegisterError::Store(other)),
    }
}

/// Verify email + password against the stored hash.
pub fn authenticate(pool: &DbPool, email: &str, password: &str) -> Result<User, LoginError> {
    let user = users::find_by_email(pool, email.trim())?
        .ok_or(LoginError::InvalidCredentials)?;

    if password::verify_password(password, &user.password_hash)? {
        Ok(user)
    } else {
        Err(LoginError::InvalidCredentials)
    }
}
