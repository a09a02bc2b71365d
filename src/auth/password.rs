//! Password hashing.
//!
//! There is a single hash path: argon2id with a random salt, stored as a PHC
//! string. Inputs are bounded to [`MAX_PASSWORD_BYTES`]; anything past that
//! many UTF-8 bytes is ignored on both hash and verify.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Number of password bytes that take part in hashing. Longer inputs are
/// truncated to exactly this many bytes, so two passwords sharing their first
/// 72 bytes are interchangeable.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// The bytes of `plain` that are actually hashed.
pub fn effective_bytes(plain: &str) -> &[u8] {
    let bytes = plain.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(effective_bytes(plain), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!("failed to hash password: {e}")
        })?
        .to_string();
    Ok(hash)
}

/// Returns `Ok(false)` on mismatch and `Err` only if `hash` is not a valid PHC string.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!("stored password hash is malformed: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(effective_bytes(plain), &parsed)
        .is_ok())
}

/// [`hash_password`] on the blocking pool.
pub async fn hash_password_async(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(|e| anyhow::anyhow!("hash task join error: {e}"))?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_async(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
        .await
        .map_err(|e| anyhow::anyhow!("verify task join error: {e}"))?
}
