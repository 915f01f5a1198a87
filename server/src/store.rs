//! Account storage.
//!
//! Handlers reach storage only through the [`UserStore`] trait, so each test
//! can run against its own isolated [`InMemoryUserStore`].
//!
//! # Thread Safety
//!
//! `InMemoryUserStore` guards its records with a `RwLock`. Lookups take the
//! read lock; `insert` and `toggle_frozen` take the write lock for the whole
//! check-and-mutate step, so two concurrent registrations with the same email
//! cannot both succeed.
//!
//! # Invariants
//!
//! - No two records share an email (case-sensitive).
//! - No two records share an id.
//! - Records are never removed.
//! - `all()` returns records in insertion order.

use std::sync::RwLock;

use crate::types::User;

/// Error returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this email already exists.
    DuplicateEmail(String),
    /// A record with this id already exists.
    DuplicateId(String),
    /// A previous holder of the lock panicked.
    LockPoisoned,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail(email) => write!(f, "email already registered: {email}"),
            Self::DuplicateId(id) => write!(f, "user id already exists: {id}"),
            Self::LockPoisoned => write!(f, "user store lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Storage operations the route handlers depend on.
pub trait UserStore: Send + Sync {
    /// Look up a record by exact email.
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look up a record by id.
    fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new record.
    ///
    /// The uniqueness check and the insert happen atomically.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail` or `DuplicateId` if either key is taken; the
    /// store is left unchanged.
    fn insert(&self, user: User) -> Result<(), StoreError>;

    /// Every record, in insertion order.
    fn all(&self) -> Result<Vec<User>, StoreError>;

    /// Flip `is_frozen` on the record with `id`.
    ///
    /// Returns the updated record, or `None` if no record has that id.
    fn toggle_frozen(&self, id: &str) -> Result<Option<User>, StoreError>;
}

/// Process-memory store over a flat list scanned linearly.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(users.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::LockPoisoned)?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }
        if users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::DuplicateId(user.id));
        }

        users.push(user);
        Ok(())
    }

    fn all(&self) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(users.clone())
    }

    fn toggle_frozen(&self, id: &str) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::LockPoisoned)?;

        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.is_frozen = !user.is_frozen;
            user.clone()
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn customer(email: &str) -> User {
        User::new_customer("Test".to_string(), email.to_string(), "hash".to_string())
    }

    #[test]
    fn test_insert_and_find() {
        let store = InMemoryUserStore::new();
        let user = customer("a@x.com");
        let id = user.id.clone();

        store.insert(user).unwrap();

        assert_eq!(store.find_by_email("a@x.com").unwrap().unwrap().id, id);
        assert_eq!(store.find_by_id(&id).unwrap().unwrap().email, "a@x.com");
        assert!(store.find_by_email("b@x.com").unwrap().is_none());
        assert!(store.find_by_id("user-missing").unwrap().is_none());
    }

    #[test]
    fn test_email_lookup_is_case_sensitive() {
        let store = InMemoryUserStore::new();
        store.insert(customer("a@x.com")).unwrap();

        assert!(store.find_by_email("A@X.COM").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_rejected_without_mutation() {
        let store = InMemoryUserStore::new();
        store.insert(customer("a@x.com")).unwrap();

        let result = store.insert(customer("a@x.com"));

        assert_eq!(
            result,
            Err(StoreError::DuplicateEmail("a@x.com".to_string()))
        );
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let store = InMemoryUserStore::new();
        let first = customer("a@x.com");
        let mut second = customer("b@x.com");
        second.id.clone_from(&first.id);

        store.insert(first).unwrap();

        assert!(matches!(
            store.insert(second),
            Err(StoreError::DuplicateId(_))
        ));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let store = InMemoryUserStore::new();
        for email in ["c@x.com", "a@x.com", "b@x.com"] {
            store.insert(customer(email)).unwrap();
        }

        let emails: Vec<String> = store.all().unwrap().into_iter().map(|u| u.email).collect();
        assert_eq!(emails, ["c@x.com", "a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_toggle_frozen_twice_restores_state() {
        let store = InMemoryUserStore::new();
        let user = customer("a@x.com");
        let id = user.id.clone();
        store.insert(user).unwrap();

        let frozen = store.toggle_frozen(&id).unwrap().unwrap();
        assert!(frozen.is_frozen);
        assert!(store.find_by_id(&id).unwrap().unwrap().is_frozen);

        let thawed = store.toggle_frozen(&id).unwrap().unwrap();
        assert!(!thawed.is_frozen);
        assert!(!store.find_by_id(&id).unwrap().unwrap().is_frozen);
    }

    #[test]
    fn test_toggle_frozen_unknown_id() {
        let store = InMemoryUserStore::new();
        assert!(store.toggle_frozen("nope").unwrap().is_none());
    }

    #[test]
    fn test_concurrent_inserts_same_email_only_one_wins() {
        let store = Arc::new(InMemoryUserStore::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.insert(customer("race@x.com")).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::DuplicateEmail("a@x.com".into()).to_string(),
            "email already registered: a@x.com"
        );
        assert_eq!(
            StoreError::DuplicateId("user-1".into()).to_string(),
            "user id already exists: user-1"
        );
        assert_eq!(StoreError::LockPoisoned.to_string(), "user store lock poisoned");
    }
}
