use thiserror::Error;

/// Error type for JWT operations.
///
/// The variants are kept apart for server-side diagnostics only; callers
/// facing clients collapse all of them into a single "unauthorized" outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,

    #[error("Token payload is invalid: {0}")]
    PayloadInvalid(String),
}
