//! Error types for the marketplace client.
//!
//! Every fallible library call returns [`Result`], an alias over [`MarketError`].
//! Failures stay scoped to the interaction that triggered them; the form flow turns
//! them into a destructive [`Notice`](crate::notify::Notice) before handing them back.

use crate::forms::FieldErrors;
use thiserror::Error;

/// The error type for marketplace client operations.
#[derive(Debug, Error)]
pub enum MarketError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{status} returned by {url}: {body}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Form input failed validation. Nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// An image upload failed.
    ///
    /// `orphaned` lists storage paths of sibling uploads from the same submission
    /// that succeeded and were left in the bucket.
    #[error("Upload of {file} failed: {reason}")]
    Upload {
        file: String,
        reason: String,
        orphaned: Vec<String>,
    },

    /// Configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarketError {
    /// HTTP status of a backend rejection, if this is one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            MarketError::Status { status, .. } => Some(*status),
            MarketError::Http(err) => err.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MarketError>;
