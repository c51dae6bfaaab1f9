//! Engine Errors
//!
//! One error type shared by every component. None of these are fatal to
//! the page; callers log them and fall back to a default.

use serde::{Deserialize, Serialize};

/// Common result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineError {
    /// Quantity bounds where `min > max`
    InvalidBounds { min: i64, max: i64 },
    /// Operation addressed an item that is not part of the form
    UnknownItem(String),
    /// Date text that does not match the form format
    InvalidDate(String),
    /// Page setup document could not be read
    InvalidSetup(String),
    /// Chart backend failed to create a chart
    ChartUnavailable(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidBounds { min, max } => {
                write!(f, "Invalid bounds: min {} is greater than max {}", min, max)
            }
            EngineError::UnknownItem(id) => write!(f, "Unknown item: {}", id),
            EngineError::InvalidDate(text) => write!(f, "Invalid date: {}", text),
            EngineError::InvalidSetup(msg) => write!(f, "Invalid setup: {}", msg),
            EngineError::ChartUnavailable(msg) => write!(f, "Chart unavailable: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::InvalidSetup(err.to_string())
    }
}
