//! End-to-end tests at the HTTP request/response level.
//!
//! Each test file covers a specific scenario, driving the full router
//! in-process against an isolated store.

#![cfg(test)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod helpers;

mod test_admin_freeze;
mod test_admin_list;
mod test_login;
mod test_middleware;
mod test_profile;
mod test_register;
mod test_status;
