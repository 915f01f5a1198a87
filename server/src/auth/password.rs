//! Password hashing.
//!
//! Salted bcrypt hashes with a single work factor for every account. Hashing
//! is CPU-bound, so both operations run on tokio's blocking pool.
//!
//! # Invariants
//! - The work factor never changes after construction.
//! - A stored hash that cannot be parsed is reported as an error, never as a
//!   mismatch.

use tokio::task;

/// Error returned when hashing or verification cannot complete.
#[derive(Debug)]
pub enum PasswordError {
    /// bcrypt rejected the input or the stored hash.
    Bcrypt(bcrypt::BcryptError),
    /// The blocking task panicked or was cancelled.
    TaskFailed(String),
}

impl std::fmt::Display for PasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bcrypt(e) => write!(f, "bcrypt error: {e}"),
            Self::TaskFailed(reason) => write!(f, "password task failed: {reason}"),
        }
    }
}

impl std::error::Error for PasswordError {}

impl From<bcrypt::BcryptError> for PasswordError {
    fn from(error: bcrypt::BcryptError) -> Self {
        Self::Bcrypt(error)
    }
}

impl From<task::JoinError> for PasswordError {
    fn from(error: task::JoinError) -> Self {
        Self::TaskFailed(error.to_string())
    }
}

/// Hashes and verifies passwords with a fixed bcrypt cost.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// # Pre-conditions
    /// - `cost` is within bcrypt's accepted range (4-31); config loading
    ///   enforces this.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash `plaintext` with a fresh random salt.
    pub async fn hash(&self, plaintext: String) -> Result<String, PasswordError> {
        let cost = self.cost;
        let hash = task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;
        Ok(hash)
    }

    /// Check `plaintext` against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch.
    pub async fn verify(&self, plaintext: String, hash: String) -> Result<bool, PasswordError> {
        let matches = task::spawn_blocking(move || bcrypt::verify(plaintext, &hash)).await??;
        Ok(matches)
    }
}
