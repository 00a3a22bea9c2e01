use core::fmt;
use std::{
    cmp::Ordering,
    str::FromStr,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::WkError;

pub mod order;

pub use order::ItemOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Incorrect answers over both axes.
    Toxicity,
    MaxStreak,
    /// Mastery percentage, weakest first by default.
    ErrorRate,
    /// Unlock date.
    Recency,
    /// Next review date.
    Availability,
    Level,
    Stage,
    Kind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl SortField {
    pub const ALL: [SortField; 8] = [
        SortField::Toxicity,
        SortField::MaxStreak,
        SortField::ErrorRate,
        SortField::Recency,
        SortField::Availability,
        SortField::Level,
        SortField::Stage,
        SortField::Kind,
    ];

    pub fn default_direction(self) -> SortDirection {
        match self {
            SortField::Kind => SortDirection::Ascending,
            SortField::Toxicity
            | SortField::MaxStreak
            | SortField::ErrorRate
            | SortField::Recency
            | SortField::Availability
            | SortField::Level
            | SortField::Stage => SortDirection::Descending,
        }
    }

    /// Tie breaker used when none is given. Every path ends at Recency or
    /// Availability, so default chains are finite.
    pub fn default_secondary(self) -> Option<SortField> {
        match self {
            SortField::Toxicity => Some(SortField::MaxStreak),
            SortField::MaxStreak => Some(SortField::ErrorRate),
            SortField::ErrorRate => Some(SortField::Recency),
            SortField::Recency => None,
            SortField::Availability => None,
            SortField::Level => Some(SortField::Stage),
            SortField::Stage => Some(SortField::Availability),
            SortField::Kind => Some(SortField::Level),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Toxicity => "toxicity",
            SortField::MaxStreak => "max_streak",
            SortField::ErrorRate => "error_rate",
            SortField::Recency => "recency",
            SortField::Availability => "availability",
            SortField::Level => "level",
            SortField::Stage => "stage",
            SortField::Kind => "kind",
        }
    }
}

impl FromStr for SortField {
    type Err = WkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == wanted)
            .ok_or_else(|| WkError::Custom(format!("Unknown sort field: {}", s)))
    }
}

impl FromStr for SortDirection {
    type Err = WkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(WkError::Custom(format!("Unknown sort direction: {}", s))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let readable = match self {
            SortField::Toxicity => "Toxicity",
            SortField::MaxStreak => "Max Streak",
            SortField::ErrorRate => "Error Rate",
            SortField::Recency => "Recency",
            SortField::Availability => "Availability",
            SortField::Level => "Level",
            SortField::Stage => "Stage",
            SortField::Kind => "Kind",
        };
        f.pad(readable)
    }
}

#[cfg(test)]
mod sort_tests;
