//! Error types for the TSP local search.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// A longitude or latitude that is not a finite real number.
    #[error("malformed coordinate for city '{city}': '{value}'")]
    MalformedCoordinate { city: String, value: String },
    /// A tour that is not a permutation of every city index.
    #[error("invalid tour: {0}")]
    InvalidTour(String),
    /// Fewer than two cities, so no swap neighborhood exists.
    #[error("degenerate instance: {cities} cities, at least 2 required")]
    DegenerateInstance { cities: usize },
    #[error("invalid input on line {line}: {reason}")]
    InvalidInput { line: usize, reason: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn malformed_coordinate(city: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedCoordinate {
            city: city.into(),
            value: value.into(),
        }
    }

    pub fn invalid_tour(message: impl Into<String>) -> Self {
        Self::InvalidTour(message.into())
    }

    pub fn invalid_input(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            line,
            reason: reason.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
