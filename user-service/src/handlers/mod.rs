//! HTTP handlers for user-service.

pub mod health;
pub mod users;
