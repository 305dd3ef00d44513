//! Activity domain types for the fitness platform.

pub mod models;

pub use models::{ActivityType, UnknownActivityType};
