//! Error types for the gdm core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for gdm operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A scalar was out of range or could not be coerced to the expected type
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A date string did not parse as `dd.mm.yyyy`
    #[error("Invalid date '{0}'. Use DD.MM.YYYY")]
    InvalidDateFormat(String),

    /// Catalog miss on an exact, case-sensitive product name
    #[error("Product not found in food catalog: '{0}'")]
    ProductNotFound(String),

    /// The food catalog source is missing or malformed
    #[error("Failed to load food catalog: {0}")]
    CatalogLoad(String),

    /// A requested row does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Recommendations were requested before any profile was saved
    #[error("No health profile saved yet")]
    NoProfileAvailable,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// True for errors the user can fix by correcting input and resubmitting.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_)
                | Error::InvalidDateFormat(_)
                | Error::ProductNotFound(_)
                | Error::NotFound(_)
                | Error::NoProfileAvailable
        )
    }
}
