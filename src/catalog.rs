//! Product data model and the catalog collaborator boundary.
//!
//! The engine never owns catalog storage: it pulls a full snapshot through
//! the [`CatalogSource`] trait at initialization time and treats the
//! returned products as immutable. `JsonCatalog` is the file-backed source
//! used by the CLI and integration tests.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Product identifier. The source catalogs mix numeric and string ids, so
/// everything is normalized to a string at the boundary.
pub type ProductId = String;

/// A catalog product. Only the textual fields (name, category, brand,
/// description) participate in scoring; price and image are passed through
/// untouched for callers to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Synthesize the corpus document this product is indexed under.
    ///
    /// The name appears twice to double its term frequency relative to the
    /// other fields; absent brand/description contribute nothing.
    pub fn corpus_text(&self) -> String {
        let mut text = String::with_capacity(
            self.name.len() * 2
                + self.category.len()
                + self.brand.as_deref().map_or(0, str::len)
                + self.description.as_deref().map_or(0, str::len)
                + 8,
        );
        text.push_str(&self.name);
        text.push(' ');
        text.push_str(&self.name);
        text.push(' ');
        text.push_str(&self.category);
        if let Some(brand) = &self.brand {
            text.push(' ');
            text.push_str(brand);
        }
        if let Some(description) = &self.description {
            text.push(' ');
            text.push_str(description);
        }
        text
    }

    /// The query used to find items related to this product.
    ///
    /// Deliberately narrower than the corpus document (name and category
    /// only) to bias toward closely related items rather than re-matching
    /// the product's own long description.
    pub fn related_query(&self) -> String {
        format!("{} {}", self.name, self.category)
    }
}

/// Pull-based source of truth for the product catalog.
///
/// The engine calls `fetch_all` once per (re)initialization and never
/// mutates what it receives. A fetch failure surfaces as an initialization
/// failure; the engine retries on its next call.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Return the full current catalog.
    async fn fetch_all(&self) -> Result<Vec<Product>>;
}

/// Catalog source backed by a JSON file containing an array of products.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for JsonCatalog {
    async fn fetch_all(&self) -> Result<Vec<Product>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| Error::CatalogRead {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_str(&raw).map_err(|source| Error::CatalogParse {
            path: self.path.clone(),
            source,
        })
    }
}
