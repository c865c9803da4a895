//! Relevance scoring and ranking over the TF-IDF index.
//!
//! `score` produces the raw per-document measures for a query; `rank`
//! orders them for callers. Both are pure with respect to the index: the
//! same query against an unchanged index always yields the same output.

use crate::tfidf::{self, TfIdfIndex};

/// A scored document: position in the index plus its relevance measure.
/// Only documents with measure > 0 are ever emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub doc: usize,
    pub measure: f64,
}

/// Score every indexed document against `query`.
///
/// Documents with zero relevance are omitted entirely, not returned with a
/// zero measure. Results come back in document order; an empty or
/// all-stop-word query yields no results.
pub fn score(index: &TfIdfIndex, query: &str) -> Vec<Scored> {
    let query_terms = tfidf::tokenize(query);
    if query_terms.is_empty() {
        return Vec::new();
    }

    (0..index.doc_count())
        .filter_map(|doc| {
            let measure = index.measure(&query_terms, doc);
            (measure > 0.0).then_some(Scored { doc, measure })
        })
        .collect()
}

/// Score and sort descending by measure.
///
/// The sort is stable, so ties keep document order - callers downstream
/// rely on this for deterministic output.
pub fn rank(index: &TfIdfIndex, query: &str) -> Vec<Scored> {
    let mut results = score(index, query);
    results.sort_by(|a, b| {
        b.measure
            .partial_cmp(&a.measure)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}
