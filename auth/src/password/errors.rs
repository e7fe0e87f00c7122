use thiserror::Error;

/// Error type for password operations.
///
/// A wrong password is not an error: `PasswordHasher::verify` returns `Ok(false)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash could not be decoded: {0}")]
    HashDecode(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
}
