// Life of a request:
// 1. CORS and trace layers wrap every request
// 2. Protected routes pass through `require_bearer`, which verifies the token
//    and attaches an `Identity`
// 3. The handler reads or mutates the `UserStore` and renders JSON
// 4. Any failure is an `ApiError`, rendered as `{"message": ...}`
//
// System components:
//  - User store (in memory)
//  - Credential service (bcrypt)
//  - Token service (HS256 JWT)
//  - Auth middleware
//  - Route handlers

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod types;

mod e2e_tests;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
pub use store::{InMemoryUserStore, StoreError, UserStore};
