//! User records and the JSON views derived from them.
//!
//! # Invariants
//!
//! - `id` is never empty and never changes for the lifetime of a record.
//! - `password_hash` is a bcrypt hash, never the plaintext password.
//! - Views never carry `password_hash`.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Id of the admin account seeded at startup.
pub const SEEDED_ADMIN_ID: &str = "admin-001";

/// Display name of the admin account seeded at startup.
pub const SEEDED_ADMIN_NAME: &str = "Admin User";

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique, compared case-sensitively.
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_frozen: bool,
    pub investments: i64,
    pub loans: i64,
}

impl User {
    /// Build a fresh self-registered (non-admin, unfrozen) account.
    #[must_use]
    pub fn new_customer(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: new_user_id(),
            name,
            email,
            password_hash,
            is_admin: false,
            is_frozen: false,
            investments: 0,
            loans: 0,
        }
    }

    /// Build the admin account seeded at process start.
    #[must_use]
    pub fn seeded_admin(email: String, password_hash: String) -> Self {
        Self {
            id: SEEDED_ADMIN_ID.to_string(),
            name: SEEDED_ADMIN_NAME.to_string(),
            email,
            password_hash,
            is_admin: true,
            is_frozen: false,
            investments: 0,
            loans: 0,
        }
    }
}

/// Generate an id of the form `user-<unix millis>-<8 hex chars>`.
///
/// The random suffix keeps two registrations within the same millisecond
/// from colliding.
#[must_use]
pub fn new_user_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis());
    let suffix: u32 = rand::random();
    format!("user-{millis}-{suffix:08x}")
}

/// Body of `GET /api/users/profile`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfileView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub investments: i64,
    pub loans: i64,
}

impl From<&User> for ProfileView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            investments: user.investments,
            loans: user.loans,
        }
    }
}

/// One entry of `GET /api/admin/users`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub is_frozen: bool,
    pub investments: i64,
    pub loans: i64,
}

impl From<&User> for AccountSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            is_frozen: user.is_frozen,
            investments: user.investments,
            loans: user.loans,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_defaults() {
        let user = User::new_customer("A".into(), "a@x.com".into(), "hash".into());

        assert!(user.id.starts_with("user-"));
        assert!(!user.is_admin);
        assert!(!user.is_frozen);
        assert_eq!(user.investments, 0);
        assert_eq!(user.loans, 0);
    }

    #[test]
    fn test_seeded_admin() {
        let admin = User::seeded_admin("admin@fintrust.com".into(), "hash".into());

        assert_eq!(admin.id, "admin-001");
        assert_eq!(admin.name, "Admin User");
        assert!(admin.is_admin);
        assert!(!admin.is_frozen);
    }

    #[test]
    fn test_user_ids_are_distinct() {
        let ids: std::collections::HashSet<String> = (0..64).map(|_| new_user_id()).collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn test_account_summary_omits_password_hash() {
        let user = User::new_customer("A".into(), "a@x.com".into(), "$2b$04$secret".into());
        let json = serde_json::to_value(AccountSummary::from(&user)).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["isFrozen"], false);
        assert_eq!(json["isAdmin"], false);
    }

    #[test]
    fn test_profile_view_fields() {
        let user = User::new_customer("A".into(), "a@x.com".into(), "hash".into());
        let json = serde_json::to_value(ProfileView::from(&user)).unwrap();

        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["email", "id", "investments", "loans", "name"]);
    }
}
