//! Error types for geo-quiz

use thiserror::Error;

/// Main error type for geo-quiz operations
///
/// An incorrect answer is not an error; see [`crate::quiz::AnswerOutcome`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid feed: {0}")]
    InvalidFeed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Geo error: {0}")]
    Geo(String),
}

impl Error {
    /// True for errors caused by bad caller input (coordinates, answers, feed records)
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidCoordinates(_) | Self::InvalidInput(_) | Self::InvalidFeed(_)
        )
    }
}

/// Result type alias for geo-quiz operations
pub type Result<T> = std::result::Result<T, Error>;
