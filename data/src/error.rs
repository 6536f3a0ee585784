use thiserror::Error;

/// Custom error type for dataset operations.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Series name must not be empty")]
    EmptyName,

    #[error("A series named '{0}' already exists in this ensemble")]
    DuplicateSeries(String),

    #[error("No series named '{0}' in this ensemble")]
    UnknownSeries(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DataError>;
