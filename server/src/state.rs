//! Shared state handed to every route handler.

use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenService};
use crate::store::UserStore;

#[derive(Clone)]
#[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected for shared state
pub struct AppState {
    /// Account storage. Injected so tests can supply an isolated store.
    pub store: Arc<dyn UserStore>,
    pub passwords: PasswordHasher,
    /// Sole owner of the token signing secret.
    pub tokens: Arc<TokenService>,
    /// Email of the seeded admin, echoed by the status endpoint.
    pub admin_email: Arc<str>,
}

impl AppState {
    #[must_use]
    pub fn new(
        store: Arc<dyn UserStore>,
        passwords: PasswordHasher,
        tokens: TokenService,
        admin_email: &str,
    ) -> Self {
        Self {
            store,
            passwords,
            tokens: Arc::new(tokens),
            admin_email: Arc::from(admin_email),
        }
    }
}
