//! Authentication module.
//!
//! Password hashing, bearer-token issuance and verification, and the
//! middleware that turns a bearer token into a request [`Identity`].
//!
//! # Invariants
//! - The token signing secret never leaves [`TokenService`].
//! - Every protected request is verified independently; there is no session
//!   state.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, TOKEN_LIFETIME_SECS, TokenError, TokenService};
pub use middleware::{Identity, extract_bearer, require_bearer};
pub use password::{PasswordError, PasswordHasher};
