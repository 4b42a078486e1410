/**
 * Credential Hashing
 *
 * Salted bcrypt hashing of user passwords with a fixed work factor.
 * Plaintexts are never stored or logged.
 */

use thiserror::Error;

/// bcrypt work factor
pub const BCRYPT_COST: u32 = 10;

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing failure
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password exceeds {MAX_PASSWORD_BYTES} bytes")]
    TooLong,
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// Hash a plaintext password
///
/// Rejects inputs bcrypt would silently truncate, so two distinct
/// passwords can never share a digest.
pub fn hash(plaintext: &str) -> Result<String, PasswordError> {
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(PasswordError::TooLong);
    }
    Ok(bcrypt::hash(plaintext, BCRYPT_COST)?)
}

/// Compare a plaintext password against a stored digest
pub fn compare(plaintext: &str, digest: &str) -> Result<bool, PasswordError> {
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }
    Ok(bcrypt::verify(plaintext, digest)?)
}

/// Hash on the blocking pool
pub async fn hash_blocking(plaintext: String) -> Result<Result<String, PasswordError>, tokio::task::JoinError> {
    tokio::task::spawn_blocking(move || hash(&plaintext)).await
}

/// Compare on the blocking pool
pub async fn compare_blocking(
    plaintext: String,
    digest: String,
) -> Result<Result<bool, PasswordError>, tokio::task::JoinError> {
    tokio::task::spawn_blocking(move || compare(&plaintext, &digest)).await
}
