//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the user id (`sub`), the admin flag
//! (`isAdmin`), the issue time (`iat`) and a 7-day expiry (`exp`).
//!
//! # Pre-conditions
//! - The signing secret is non-empty.
//!
//! # Post-conditions
//! - `verify` returns exactly the claims encoded at `issue` time.
//!
//! # Invariants
//! - Only `TokenService` holds the signing secret.
//! - Verification is stateless and does not modify any external state.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    get_current_timestamp,
};
use serde::{Deserialize, Serialize};

/// Lifetime of an issued token.
pub const TOKEN_LIFETIME_SECS: u64 = 7 * 24 * 60 * 60;

/// Claims encoded in every token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Id of the authenticated user.
    #[serde(default)]
    pub sub: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    #[serde(default)]
    pub iat: u64,
    pub exp: u64,
}

/// Error returned when a token cannot be issued or verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The signature does not match the configured secret.
    InvalidSignature,
    /// `exp` is in the past.
    Expired,
    /// The token is malformed or cannot be parsed.
    Malformed,
    /// The `sub` claim is missing or empty.
    MissingSubject,
    /// The secret is unusable.
    InvalidKey(String),
    /// Signing failed.
    Encoding(String),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSignature => write!(f, "invalid token signature"),
            Self::Expired => write!(f, "token has expired"),
            Self::Malformed => write!(f, "malformed token"),
            Self::MissingSubject => write!(f, "missing 'sub' claim in token"),
            Self::InvalidKey(reason) => write!(f, "invalid key: {reason}"),
            Self::Encoding(reason) => write!(f, "failed to sign token: {reason}"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Signs and verifies bearer tokens with one process-wide secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a token service for an HS256 secret.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidKey` if the secret is empty.
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidKey("secret must be non-empty".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Issue a token valid for [`TOKEN_LIFETIME_SECS`] from now.
    pub fn issue(&self, user_id: &str, is_admin: bool) -> Result<String, TokenError> {
        self.issue_at(user_id, is_admin, get_current_timestamp())
    }

    /// Issue a token as if the current time were `issued_at` (unix seconds).
    pub fn issue_at(
        &self,
        user_id: &str,
        is_admin: bool,
        issued_at: u64,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            is_admin,
            iat: issued_at,
            exp: issued_at.saturating_add(TOKEN_LIFETIME_SECS),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// Returns `TokenError` if the signature, expiry, or structure is invalid.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(map_jwt_error)?;

        if token_data.claims.sub.is_empty() {
            return Err(TokenError::MissingSubject);
        }

        Ok(token_data.claims)
    }
}

/// Maps jsonwebtoken errors to our `TokenError` type.
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::MissingRequiredClaim(claim) if claim == "sub" => TokenError::MissingSubject,
        _ => TokenError::Malformed,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key-that-is-long-enough";

    fn service() -> TokenService {
        TokenService::new(SECRET).unwrap()
    }

    #[test]
    fn test_issue_then_verify() {
        let tokens = service();
        let token = tokens.issue("user-123", false).unwrap();

        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, "user-123");
        assert!(!claims.is_admin);
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_SECS);
    }

    #[test]
    fn test_admin_flag_round_trips() {
        let tokens = service();
        let token = tokens.issue("admin-001", true).unwrap();

        assert!(tokens.verify(&token).unwrap().is_admin);
    }

    #[test]
    fn test_tokens_do_not_cross_users() {
        let tokens = service();
        let alice = tokens.issue("alice", false).unwrap();
        let bob = tokens.issue("bob", false).unwrap();

        assert_eq!(tokens.verify(&alice).unwrap().sub, "alice");
        assert_eq!(tokens.verify(&bob).unwrap().sub, "bob");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue("user-123", false).unwrap();
        let other = TokenService::new(b"wrong-secret-key-that-is-different").unwrap();

        assert_eq!(other.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();
        let long_ago = get_current_timestamp() - TOKEN_LIFETIME_SECS - 3600;
        let token = tokens.issue_at("user-123", false, long_ago).unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_malformed_token() {
        assert_eq!(service().verify("not-a-valid-jwt"), Err(TokenError::Malformed));
        assert_eq!(service().verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_empty_subject_rejected() {
        let tokens = service();
        let token = tokens.issue("", false).unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::MissingSubject));
    }

    #[test]
    fn test_missing_subject_claim_rejected() {
        #[derive(Serialize)]
        struct NoSubject {
            exp: u64,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoSubject {
                exp: get_current_timestamp() + 60,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::MissingSubject));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            TokenService::new(b""),
            Err(TokenError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_token_error_display() {
        assert_eq!(TokenError::InvalidSignature.to_string(), "invalid token signature");
        assert_eq!(TokenError::Expired.to_string(), "token has expired");
        assert_eq!(TokenError::Malformed.to_string(), "malformed token");
        assert_eq!(
            TokenError::MissingSubject.to_string(),
            "missing 'sub' claim in token"
        );
        assert_eq!(
            TokenError::InvalidKey("bad key".to_string()).to_string(),
            "invalid key: bad key"
        );
    }
}
