// Error types for the brp client library.
// Covers storage backend failures, HTTP errors, and general application errors.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum WeappError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, WeappError>;
