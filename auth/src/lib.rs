//! Credential and session verification core.
//!
//! - Password hashing (Argon2id, PHC string format)
//! - Session token issuance and verification (HS256 JWT)
//! - Authorization gate over a raw `Authorization` header value
//! - Authentication coordination
//!
//! The token secret is always passed in explicitly; nothing here reads
//! process-wide state.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password").unwrap());
//! assert!(!hasher.verify(&hash, "not_my_password").unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{issue_token, verify_token, Identity};
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let token = issue_token(&Identity::new("user123"), secret).unwrap();
//! assert_eq!(verify_token(&token, secret).unwrap(), Identity::new("user123"));
//! assert!(verify_token(&token, b"some_other_secret_entirely_32_byt").is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, GateOutcome, Identity};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Signup: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Signin: verify and issue token
//! let token = auth
//!     .authenticate(&hash, "password123", &Identity::new("user123"))
//!     .unwrap();
//!
//! // Later requests: run the gate
//! let outcome = auth.authorize(Some(format!("Bearer {token}").as_str()));
//! assert_eq!(outcome, GateOutcome::Authenticated(Identity::new("user123")));
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use gate::GateOutcome;
pub use gate::Rejection;
pub use jwt::issue_token;
pub use jwt::verify_token;
pub use jwt::Identity;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::HasherParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
