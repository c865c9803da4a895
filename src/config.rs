//! Engine configuration: fallback queries and result limits.
//!
//! The fallback topics ("safety tools", "safety") match the reference
//! deployment's defaults but are deployment-configurable via a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Recommendation engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Query used when the cart is empty.
    pub default_query: String,

    /// Secondary query appended when related-item results run thin.
    pub broaden_query: String,

    /// Widen with `broaden_query` when related results fall below this.
    pub broaden_threshold: usize,

    /// Maximum related items returned per reference product.
    pub related_limit: usize,

    /// Maximum recommendations returned for a cart.
    pub cart_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_query: "safety tools".to_string(),
            broaden_query: "safety".to_string(),
            broaden_threshold: 3,
            related_limit: 5,
            cart_limit: 5,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing keys fall back to defaults. Errors if the file is absent or
    /// malformed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
