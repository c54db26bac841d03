//! Error handling for product retrieval, configuration and CLI operations.
//!
//! The bulletin parser itself never fails: malformed text degrades into the
//! `unprocessed` fields of its output. These errors cover everything around it,
//! such as reading cached products, decoding product envelopes and loading
//! configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Product file not found: {path}")]
    ProductNotFound { path: PathBuf },

    #[error("Invalid product document: {path} - {reason}")]
    InvalidProduct { path: PathBuf, reason: String },

    #[error("No forecasts found for location {location}, searched {searched}")]
    NoProducts { location: String, searched: PathBuf },

    #[error("Invalid cache pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Directory traversal failed: {0}")]
    DirectoryTraversal(#[from] walkdir::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl ForecastError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid product error for a given source path
    pub fn invalid_product(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidProduct {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_products_message() {
        let error = ForecastError::NoProducts {
            location: "BOX".to_string(),
            searched: PathBuf::from("/tmp/cache"),
        };
        assert_eq!(
            error.to_string(),
            "No forecasts found for location BOX, searched /tmp/cache"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: ForecastError = io.into();
        assert!(matches!(error, ForecastError::Io(_)));
    }
}
