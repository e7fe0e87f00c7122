use std::sync::OnceLock;

use chrono::Duration;

use crate::gate;
use crate::gate::GateOutcome;
use crate::jwt::Identity;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

const DECOY_PASSWORD: &str = "decoy-password-never-assigned";

/// Authentication coordinator combining password verification and session tokens.
///
/// Holds the shared token secret for its whole lifetime; construct one per
/// process and share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    decoy_hash: OnceLock<Option<String>>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with default hashing cost and no token expiry.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Replace the password hasher.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.decoy_hash = OnceLock::new();
        self
    }

    /// Issue tokens that expire `ttl` after issuance.
    pub fn with_token_expiration(mut self, ttl: Duration) -> Self {
        self.jwt_handler = self.jwt_handler.with_expiration(ttl);
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash (hash first).
    ///
    /// # Errors
    /// * `HashDecode` - Stored hash is malformed
    pub fn verify_password(&self, stored_hash: &str, password: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(stored_hash, password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `stored_hash` - Stored password hash
    /// * `password` - Plaintext password to verify
    /// * `identity` - Identity to embed in the token
    ///
    /// # Returns
    /// Session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be decoded
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        stored_hash: &str,
        password: &str,
        identity: &Identity,
    ) -> Result<String, AuthenticationError> {
        if !self.password_hasher.verify(stored_hash, password)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.jwt_handler.issue(identity)?)
    }

    /// Spend one full password verification on an account that does not exist.
    ///
    /// Called when no stored hash matches the presented credentials, so the
    /// caller takes as long as it would for a wrong password. The decoy hash
    /// is made once with the configured cost and never matches.
    ///
    /// # Errors
    /// * `PasswordError` - Decoy hash could not be produced
    pub fn verify_decoy(&self, password: &str) -> Result<bool, PasswordError> {
        let decoy_hash = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).ok());

        match decoy_hash {
            Some(hash) => self.password_hasher.verify(hash, password).map(|_| false),
            None => self.password_hasher.hash(password).map(|_| false),
        }
    }

    /// Issue a session token without password verification.
    ///
    /// Used right after signup, when the credentials were just created.
    pub fn issue_token(&self, identity: &Identity) -> Result<String, JwtError> {
        self.jwt_handler.issue(identity)
    }

    /// Verify a session token and extract its identity.
    pub fn verify_token(&self, token: &str) -> Result<Identity, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// Run the authorization gate over a raw `Authorization` header value.
    pub fn authorize(&self, header: Option<&str>) -> GateOutcome {
        gate::authorize(header, &self.jwt_handler)
    }
}
