//! The recommendation service: lazily initialized, shared, read-mostly.
//!
//! One engine instance owns the live TF-IDF index and the product snapshot
//! it was built from. The pair is immutable once built and swapped as a
//! unit, so concurrent readers can never observe an index from one build
//! resolved against a snapshot from another.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cart::Cart;
use crate::catalog::{CatalogSource, Product, ProductId};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::rank;
use crate::tfidf::TfIdfIndex;

/// Index + snapshot pair from one build. Immutable after construction.
struct ReadyState {
    index: TfIdfIndex,
    snapshot: Vec<Product>,
    /// id -> position in `snapshot` (and therefore in `index`).
    by_id: HashMap<ProductId, usize>,
}

impl ReadyState {
    /// Build index and snapshot together from one pass over one list, so
    /// index position i always corresponds to snapshot[i].
    fn build(products: Vec<Product>) -> Self {
        let mut index = TfIdfIndex::new();
        let mut by_id = HashMap::with_capacity(products.len());
        for (i, product) in products.iter().enumerate() {
            index.add_document(&product.corpus_text());
            by_id.entry(product.id.clone()).or_insert(i);
        }
        Self {
            index,
            snapshot: products,
            by_id,
        }
    }
}

enum EngineState {
    Uninitialized,
    Ready(Arc<ReadyState>),
}

/// Observable engine status, for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Uninitialized,
    Ready { products: usize },
}

/// Content-based recommendation engine over a catalog snapshot.
pub struct RecommendationEngine {
    source: Arc<dyn CatalogSource>,
    config: EngineConfig,
    state: RwLock<EngineState>,
}

impl RecommendationEngine {
    /// Create an uninitialized engine. The catalog is not fetched until
    /// [`initialize`](Self::initialize) or the first query.
    pub fn new(source: Arc<dyn CatalogSource>, config: EngineConfig) -> Self {
        Self {
            source,
            config,
            state: RwLock::new(EngineState::Uninitialized),
        }
    }

    /// Eagerly build the index. Idempotent: a second call while `Ready` is
    /// a no-op and does not fetch the catalog again.
    ///
    /// On failure the engine stays `Uninitialized` and the next call (from
    /// here or from any query) retries the full build.
    pub async fn initialize(&self) -> Result<()> {
        self.ensure_ready().await.map(|_| ())
    }

    /// Administrative wholesale rebuild: fetch the catalog again and swap
    /// the new index/snapshot pair in atomically. Readers keep whatever
    /// pair they already resolved.
    pub async fn rebuild(&self) -> Result<()> {
        let mut guard = self.state.write().await;
        let products = self.source.fetch_all().await?;
        let ready = Arc::new(ReadyState::build(products));
        tracing::info!(products = ready.snapshot.len(), "rebuilt recommendation index");
        *guard = EngineState::Ready(ready);
        Ok(())
    }

    /// Current engine status.
    pub async fn status(&self) -> EngineStatus {
        match &*self.state.read().await {
            EngineState::Uninitialized => EngineStatus::Uninitialized,
            EngineState::Ready(ready) => EngineStatus::Ready {
                products: ready.snapshot.len(),
            },
        }
    }

    /// Get the ready state, building it first if necessary.
    ///
    /// The write lock is held across the catalog fetch: this is the
    /// initialization guard, serializing concurrent cold-start callers so
    /// the catalog is never loaded twice at once. On a failed build the
    /// guard drops with the state still `Uninitialized`.
    async fn ensure_ready(&self) -> Result<Arc<ReadyState>> {
        if let EngineState::Ready(ready) = &*self.state.read().await {
            return Ok(ready.clone());
        }

        let mut guard = self.state.write().await;
        // Another caller may have finished the build while we waited.
        if let EngineState::Ready(ready) = &*guard {
            return Ok(ready.clone());
        }

        tracing::info!("initializing recommendation engine");
        let products = self.source.fetch_all().await?;
        let ready = Arc::new(ReadyState::build(products));
        tracing::info!(
            products = ready.snapshot.len(),
            "recommendation engine initialized"
        );
        *guard = EngineState::Ready(ready.clone());
        Ok(ready)
    }

    /// As `ensure_ready`, but degrading: query paths log the failure and
    /// serve an empty result rather than surfacing an error.
    async fn ready_or_log(&self) -> Option<Arc<ReadyState>> {
        match self.ensure_ready().await {
            Ok(ready) => Some(ready),
            Err(err) => {
                tracing::error!(error = %err, "recommendation engine initialization failed");
                None
            }
        }
    }

    /// Full-text search over the catalog, most relevant first.
    ///
    /// Only products sharing at least one term with the query are
    /// returned; ties keep catalog order. No result cap at this layer.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        let Some(ready) = self.ready_or_log().await else {
            return Vec::new();
        };
        Self::search_ready(&ready, query)
    }

    fn search_ready(ready: &ReadyState, query: &str) -> Vec<Product> {
        rank::rank(&ready.index, query)
            .into_iter()
            .map(|s| ready.snapshot[s.doc].clone())
            .collect()
    }

    /// Products related to `product_id`, at most `limit`, never including
    /// the reference product itself. An unknown id yields an empty list.
    pub async fn related_to(&self, product_id: &str, limit: usize) -> Vec<Product> {
        let Some(ready) = self.ready_or_log().await else {
            return Vec::new();
        };
        Self::related_ready(&ready, product_id, limit)
    }

    fn related_ready(ready: &ReadyState, product_id: &str, limit: usize) -> Vec<Product> {
        let Some(&pos) = ready.by_id.get(product_id) else {
            tracing::debug!(product_id, "related_to: unknown product id");
            return Vec::new();
        };
        let query = ready.snapshot[pos].related_query();
        Self::search_ready(ready, &query)
            .into_iter()
            .filter(|p| p.id != product_id)
            .take(limit)
            .collect()
    }

    /// Recommendations for a cart: related items for the most recently
    /// added line, widened with a generic query when thin, deduplicated
    /// and capped.
    ///
    /// An empty cart falls back to the configured default topic. The
    /// widening step appends rather than replaces, trading topical purity
    /// for never returning an unhelpfully short list.
    pub async fn recommendations_for_cart(&self, cart: &Cart) -> Vec<Product> {
        let Some(ready) = self.ready_or_log().await else {
            return Vec::new();
        };

        let candidates = match cart.last_added() {
            None => Self::search_ready(&ready, &self.config.default_query),
            Some(line) => {
                let mut related =
                    Self::related_ready(&ready, &line.product_id, self.config.related_limit);
                if related.len() < self.config.broaden_threshold {
                    related.extend(Self::search_ready(&ready, &self.config.broaden_query));
                }
                related
            }
        };

        dedup_by_id(candidates, self.config.cart_limit)
    }
}

/// Keep the first occurrence of each product id, capped at `limit`.
fn dedup_by_id(products: Vec<Product>, limit: usize) -> Vec<Product> {
    let mut seen: HashSet<ProductId> = HashSet::with_capacity(products.len());
    let mut unique = Vec::with_capacity(limit);
    for product in products {
        if unique.len() == limit {
            break;
        }
        if seen.insert(product.id.clone()) {
            unique.push(product);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            brand: None,
            description: None,
            price: None,
            image: None,
        }
    }

    #[test]
    fn test_ready_state_pairs_index_with_snapshot() {
        let products = vec![
            product("1", "Claw Hammer", "Hand Tools"),
            product("2", "Safety Goggles", "Safety"),
            product("3", "Cordless Drill", "Power Tools"),
        ];
        let ready = ReadyState::build(products);

        assert_eq!(ready.index.doc_count(), ready.snapshot.len());
        for (id, &pos) in &ready.by_id {
            assert_eq!(&ready.snapshot[pos].id, id);
        }
        // The document scored at position i is the corpus text of snapshot[i]
        let results = rank::rank(&ready.index, "goggles");
        assert_eq!(results.len(), 1);
        assert_eq!(ready.snapshot[results[0].doc].id, "2");
    }

    #[test]
    fn test_ready_state_first_occurrence_wins_on_duplicate_id() {
        let products = vec![
            product("1", "Claw Hammer", "Hand Tools"),
            product("1", "Sledge Hammer", "Hand Tools"),
        ];
        let ready = ReadyState::build(products);
        assert_eq!(ready.by_id[&"1".to_string()], 0);
    }

    #[test]
    fn test_dedup_by_id_preserves_first_seen_order() {
        let products = vec![
            product("1", "Hammer", "Tools"),
            product("2", "Drill", "Tools"),
            product("1", "Hammer", "Tools"),
            product("3", "Saw", "Tools"),
        ];
        let unique = dedup_by_id(products, 5);
        let ids: Vec<&str> = unique.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_dedup_by_id_caps_at_limit() {
        let products = (0..10)
            .map(|i| product(&i.to_string(), "Widget", "Misc"))
            .collect();
        assert_eq!(dedup_by_id(products, 5).len(), 5);
    }
}
