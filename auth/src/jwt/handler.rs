use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::Identity;
use super::claims::SessionClaims;
use super::errors::JwtError;

/// JWT token handler for issuing and verifying session tokens.
///
/// Uses HS256 (HMAC with SHA-256). The signature covers the exact encoded
/// `header.payload` bytes and is compared in constant time.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Option<Duration>,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// Tokens issued by this handler carry no `exp` claim unless
    /// [`JwtHandler::with_expiration`] is used.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl: None,
        }
    }

    /// Stamp issued tokens with an `exp` claim `ttl` after issuance.
    pub fn with_expiration(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Issue a session token for an identity.
    ///
    /// # Errors
    /// * `PayloadInvalid` - Identity is empty
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, identity: &Identity) -> Result<String, JwtError> {
        if identity.id.trim().is_empty() {
            return Err(JwtError::PayloadInvalid("empty identity".to_string()));
        }

        self.encode(&SessionClaims::for_identity(identity, self.ttl))
    }

    /// Verify a session token and extract its identity.
    ///
    /// # Errors
    /// * `Malformed` - Wrong segment count, bad encoding, or bad JSON
    /// * `SignatureInvalid` - Signature does not match
    /// * `Expired` - `exp` claim is in the past
    /// * `PayloadInvalid` - Signature valid but identity missing
    pub fn verify(&self, token: &str) -> Result<Identity, JwtError> {
        self.verify_claims(token).map(|claims| claims.identity())
    }

    /// Verify a session token and return all of its claims.
    pub fn verify_claims(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let payload: serde_json::Value = self.decode(token)?;
        SessionClaims::from_payload(payload)
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// # Errors
    /// See [`JwtHandler::verify`].
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Only `exp` is enforced, and only when present
        validation.required_spec_claims.clear();

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(classify)
    }
}

fn classify(e: JsonWebTokenError) -> JwtError {
    match e.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => JwtError::SignatureInvalid,
        ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Malformed(e.to_string()),
    }
}

/// Issue a session token for `identity` signed with `secret`.
pub fn issue_token(identity: &Identity, secret: &[u8]) -> Result<String, JwtError> {
    JwtHandler::new(secret).issue(identity)
}

/// Verify a session token against `secret` and extract its identity.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Identity, JwtError> {
    JwtHandler::new(secret).verify(token)
}
