//! Unified error types for the page behavior layer.

use std::fmt;

/// Application-specific errors.
///
/// Every variant is non-fatal: one feature failing (say, the map) must not
/// take unrelated features (say, navigation) down with it, so callers log and
/// carry on.
#[derive(Debug)]
pub enum AppError {
    /// A DOM element the operation needs is not on the current page
    ElementMissing(String),
    /// The external mapping SDK is not present in the environment
    MapUnavailable,
    /// Geocoding settled with a failure status for an address
    Geocode { address: String, status: String },
    /// Page configuration could not be parsed
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ElementMissing(id) => write!(f, "element not found: {}", id),
            AppError::MapUnavailable => write!(f, "mapping SDK is not loaded"),
            AppError::Geocode { address, status } => {
                write!(f, "address search failed with status {}: {}", status, address)
            }
            AppError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, AppError>;
