//! Request and response payloads for the user API.

pub mod user;

pub use user::{RegisterRequest, UserResponse};
