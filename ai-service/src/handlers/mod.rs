//! HTTP handlers for ai-service.

pub mod ask;
pub mod health;
