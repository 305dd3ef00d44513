//! Domain models for the activity service.

pub mod activity_type;

pub use activity_type::{ActivityType, UnknownActivityType};
