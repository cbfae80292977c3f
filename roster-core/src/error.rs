//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Record Viewer
//!
//! The view engine itself is total and never fails. Everything around it
//! (dataset loading, configuration) reports through this
//! enum so the binary can attach context with `anyhow` at the edges.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for dataset loading and configuration.
#[derive(Debug, Error)]
pub enum AppError {
    /// Dataset file could not be read.
    #[error("Failed to read dataset {path:?}: {source}")]
    DatasetIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Dataset file is not a JSON array of records.
    #[error("Malformed dataset {origin}: {source}")]
    DatasetParse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two records share an id.
    #[error("Duplicate record id {id} at position {position}")]
    DuplicateId { id: String, position: usize },

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// TOML config serialization error.
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Config file I/O error with path.
    #[error("Failed to access config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Platform config directory could not be determined.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// Input validation errors
    #[error("Invalid input: {field} - {message}")]
    InvalidInput {
        field: String, // "page_size", "search_fields", etc.
        message: String,
    },
}

impl AppError {
    /// Create an input validation error
    pub fn invalid_input<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a dataset parse error for the given origin (path or label)
    pub fn dataset_parse<S: Into<String>>(origin: S, source: serde_json::Error) -> Self {
        Self::DatasetParse {
            origin: origin.into(),
            source,
        }
    }

    /// Create a dataset read error
    pub fn dataset_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::DatasetIo {
            path: path.into(),
            source,
        }
    }

    /// Create a config file access error
    pub fn config_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = AppError::invalid_input("page_size", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid input: page_size - must be greater than zero"
        );
    }

    #[test]
    fn test_duplicate_id_message() {
        let err = AppError::DuplicateId {
            id: "7".into(),
            position: 3,
        };
        assert_eq!(err.to_string(), "Duplicate record id 7 at position 3");
    }
}
