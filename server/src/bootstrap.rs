//! Startup seeding.
//!
//! # Post-conditions
//! - After a successful `seed_admin`, the store holds exactly one admin
//!   record, with id `admin-001`.

use crate::auth::{PasswordError, PasswordHasher};
use crate::store::{StoreError, UserStore};
use crate::types::User;

/// Error returned when the admin account cannot be seeded.
#[derive(Debug)]
pub enum BootstrapError {
    /// Hashing the admin password failed.
    Password(PasswordError),
    /// The store rejected the admin record.
    Store(StoreError),
    /// The store already holds an admin.
    AdminAlreadyPresent(String),
}

impl std::fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Password(e) => write!(f, "failed to hash admin password: {e}"),
            Self::Store(e) => write!(f, "failed to store admin account: {e}"),
            Self::AdminAlreadyPresent(id) => write!(f, "an admin account already exists: {id}"),
        }
    }
}

impl std::error::Error for BootstrapError {}

/// Insert the single admin account.
pub async fn seed_admin(
    store: &dyn UserStore,
    passwords: &PasswordHasher,
    email: &str,
    password: &str,
) -> Result<User, BootstrapError> {
    let existing = store.all().map_err(BootstrapError::Store)?;
    if let Some(admin) = existing.iter().find(|u| u.is_admin) {
        return Err(BootstrapError::AdminAlreadyPresent(admin.id.clone()));
    }

    let password_hash = passwords
        .hash(password.to_string())
        .await
        .map_err(BootstrapError::Password)?;
    let admin = User::seeded_admin(email.to_string(), password_hash);

    store.insert(admin.clone()).map_err(BootstrapError::Store)?;
    tracing::info!(id = %admin.id, email = %admin.email, "seeded admin account");

    Ok(admin)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::InMemoryUserStore;

    #[tokio::test]
    async fn test_seed_admin() {
        let store = InMemoryUserStore::new();
        let passwords = PasswordHasher::new(4);

        let admin = seed_admin(&store, &passwords, "admin@fintrust.com", "pw")
            .await
            .unwrap();

        assert_eq!(admin.id, "admin-001");
        assert!(admin.is_admin);
        assert_eq!(store.len().unwrap(), 1);
        assert!(
            passwords
                .verify("pw".to_string(), admin.password_hash)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_seed_admin_twice_fails() {
        let store = InMemoryUserStore::new();
        let passwords = PasswordHasher::new(4);
        seed_admin(&store, &passwords, "admin@fintrust.com", "pw")
            .await
            .unwrap();

        let result = seed_admin(&store, &passwords, "other@fintrust.com", "pw").await;

        assert!(matches!(result, Err(BootstrapError::AdminAlreadyPresent(_))));
        assert_eq!(store.len().unwrap(), 1);
    }
}
