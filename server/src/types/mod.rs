pub mod user;

pub use user::{AccountSummary, ProfileView, SEEDED_ADMIN_ID, User, new_user_id};
