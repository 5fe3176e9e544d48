use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a raw password with bcrypt. The raw value is never persisted or
/// logged anywhere.
pub fn hash_password(raw: &str) -> Result<String, bcrypt::BcryptError> {
    hash(raw, DEFAULT_COST)
}

/// Check a raw password against a stored bcrypt hash.
pub fn verify_password(raw: &str, hashed: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(raw, hashed)
}
