//! Authorization gate over a raw `Authorization` header value.
//!
//! Token extraction policy: surrounding whitespace is trimmed; a value using
//! the `Bearer` scheme (case-insensitive) yields the remainder as the token,
//! any other value is taken as the token itself.

use crate::jwt::Identity;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

const BEARER_SCHEME: &str = "bearer";

/// Result of running a request through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Authenticated(Identity),
    Rejected(Rejection),
}

/// Why a request was rejected.
///
/// For server-side diagnostics only, never sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("No credentials presented")]
    MissingCredentials,

    #[error("Token rejected: {0}")]
    Token(#[from] JwtError),
}

impl GateOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, GateOutcome::Authenticated(_))
    }
}

/// Extract the credential token from a header value.
///
/// Returns `None` when nothing usable was presented.
pub fn extract_token(header: &str) -> Option<&str> {
    let header = header.trim();

    let token = match header.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => rest.trim(),
        _ if header.eq_ignore_ascii_case(BEARER_SCHEME) => "",
        _ => header,
    };

    (!token.is_empty()).then_some(token)
}

/// Admit or reject a request based on its `Authorization` header.
///
/// Every failure, including verifier errors, becomes `Rejected`.
pub fn authorize(header: Option<&str>, tokens: &JwtHandler) -> GateOutcome {
    let Some(token) = header.and_then(extract_token) else {
        return GateOutcome::Rejected(Rejection::MissingCredentials);
    };

    match tokens.verify(token) {
        Ok(identity) if !identity.id.trim().is_empty() => GateOutcome::Authenticated(identity),
        Ok(_) => GateOutcome::Rejected(Rejection::Token(JwtError::PayloadInvalid(
            "empty identity".to_string(),
        ))),
        Err(e) => GateOutcome::Rejected(Rejection::Token(e)),
    }
}
