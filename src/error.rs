//! Consolidated error types for the shoprec library.
//!
//! All library modules use `crate::error::{Error, Result}`. The binary
//! crate (`main.rs`) uses `anyhow` where appropriate.

use std::path::PathBuf;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for shoprec library operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // -- Config --
    #[error("failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // -- Catalog --
    #[error("failed to read catalog at {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse catalog at {path}: {source}")]
    CatalogParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("catalog source unavailable: {0}")]
    CatalogUnavailable(String),

    // -- Generic --
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
    #[error("{0}")]
    Other(String),
}

/// Allow converting `std::io::Error` into `Error` for `?` in simple cases.
impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            context: "I/O error".to_string(),
            source,
        }
    }
}
