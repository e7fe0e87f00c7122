pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Identity;
pub use claims::SessionClaims;
pub use errors::JwtError;
pub use handler::issue_token;
pub use handler::verify_token;
pub use handler::JwtHandler;
