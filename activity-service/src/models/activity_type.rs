//! Activity categories used to classify logged workouts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of activity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Running,
    Walking,
    Cycling,
    Swimming,
    WeightTraining,
    Yoga,
    Hit,
    Cardio,
    Stretching,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown activity type: {0}")]
pub struct UnknownActivityType(pub String);

impl ActivityType {
    pub const ALL: [ActivityType; 10] = [
        Self::Running,
        Self::Walking,
        Self::Cycling,
        Self::Swimming,
        Self::WeightTraining,
        Self::Yoga,
        Self::Hit,
        Self::Cardio,
        Self::Stretching,
        Self::Other,
    ];

    /// Wire/storage tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Walking => "WALKING",
            Self::Cycling => "CYCLING",
            Self::Swimming => "SWIMMING",
            Self::WeightTraining => "WEIGHT_TRAINING",
            Self::Yoga => "YOGA",
            Self::Hit => "HIT",
            Self::Cardio => "CARDIO",
            Self::Stretching => "STRETCHING",
            Self::Other => "OTHER",
        }
    }

    /// Lenient parse for consumers that must not reject a record over its
    /// category: case and surrounding whitespace are ignored, `-` and spaces
    /// count as `_`, and anything unrecognized becomes [`ActivityType::Other`].
    pub fn classify(input: &str) -> Self {
        let normalized = input.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        normalized.parse().unwrap_or(Self::Other)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    /// Strict parse of the exact tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownActivityType(s.to_string()))
    }
}
