use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Identity carried by a session token.
///
/// This is the payload that round-trips through issue and verify.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
}

impl Identity {
    pub fn new(id: impl ToString) -> Self {
        Self { id: id.to_string() }
    }
}

/// Claims encoded into a session token.
///
/// Only `id` is required when decoding; `iat` and `exp` are issuance
/// metadata. When `exp` is present the JWT library enforces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Identifier of the authenticated user
    pub id: String,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl SessionClaims {
    /// Create claims for an identity, stamped with the current time.
    ///
    /// # Arguments
    /// * `identity` - Identity to embed
    /// * `ttl` - Lifetime of the token, `None` for no `exp` claim
    pub fn for_identity(identity: &Identity, ttl: Option<Duration>) -> Self {
        let now = Utc::now();

        Self {
            id: identity.id.clone(),
            iat: Some(now.timestamp()),
            exp: ttl.map(|ttl| (now + ttl).timestamp()),
        }
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Build claims from a decoded, signature-checked payload.
    ///
    /// # Errors
    /// * `PayloadInvalid` - Payload is not an object, or `id` is missing,
    ///   empty, or not a string
    pub fn from_payload(payload: serde_json::Value) -> Result<Self, JwtError> {
        let claims: SessionClaims = serde_json::from_value(payload)
            .map_err(|e| JwtError::PayloadInvalid(e.to_string()))?;

        if claims.id.trim().is_empty() {
            return Err(JwtError::PayloadInvalid("empty identity".to_string()));
        }

        Ok(claims)
    }

    pub fn identity(&self) -> Identity {
        Identity::new(&self.id)
    }
}
