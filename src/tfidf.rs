//! TF-IDF indexing over synthesized product documents.
//!
//! The index is positional and ephemeral: document *i* is always the *i*-th
//! text added at build time, there is no remove or update, and a rebuild
//! constructs a fresh index. The engine pairs each index with the product
//! snapshot built in the same pass.
//!
//! # Scoring
//!
//! ```text
//! measure(D,Q) = Σ tf(qi,D) * idf(qi)
//! idf(qi)      = 1 + ln(N / (1 + df(qi)))
//! ```
//!
//! Where:
//! - tf(qi,D) = raw count of qi in document D
//! - df(qi) = number of documents containing qi
//! - N = total number of documents

use std::collections::HashMap;

/// Common English stop words excluded from indexing.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Per-document term statistics.
#[derive(Debug, Clone)]
struct DocInfo {
    /// term -> raw frequency in this document
    term_freqs: HashMap<String, usize>,
}

/// Positional TF-IDF index.
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    /// Documents in insertion order; position is the document id.
    docs: Vec<DocInfo>,

    /// Document frequency: term -> number of documents containing it.
    doc_freqs: HashMap<String, usize>,
}

impl TfIdfIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from texts, one document per text, in order.
    pub fn build<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for text in texts {
            index.add_document(text.as_ref());
        }
        index
    }

    /// Add one document. Its position becomes the next document index.
    pub fn add_document(&mut self, text: &str) {
        let mut term_freqs: HashMap<String, usize> = HashMap::new();
        for token in tokenize(text) {
            *term_freqs.entry(token).or_insert(0) += 1;
        }
        for term in term_freqs.keys() {
            *self.doc_freqs.entry(term.clone()).or_insert(0) += 1;
        }
        self.docs.push(DocInfo { term_freqs });
    }

    /// Number of indexed documents.
    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    /// Raw term frequency of `term` in document `doc`.
    pub fn tf(&self, term: &str, doc: usize) -> usize {
        self.docs
            .get(doc)
            .and_then(|d| d.term_freqs.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Inverse document frequency: `1 + ln(N / (1 + df))`, 0.0 for terms
    /// absent from the corpus.
    pub fn idf(&self, term: &str) -> f64 {
        let df = self.doc_freqs.get(term).copied().unwrap_or(0);
        if df == 0 {
            return 0.0;
        }
        let n = self.docs.len() as f64;
        1.0 + (n / (1.0 + df as f64)).ln()
    }

    /// Summed tf-idf of the query terms against document `doc`.
    ///
    /// Nonzero exactly when the document shares at least one indexed term
    /// with the query.
    pub fn measure(&self, query_terms: &[String], doc: usize) -> f64 {
        let mut measure = 0.0;
        for term in query_terms {
            let tf = self.tf(term, doc);
            if tf > 0 {
                measure += tf as f64 * self.idf(term);
            }
        }
        measure
    }
}

/// Tokenize text: lowercase, split on non-alphanumeric, drop stop words,
/// light plural stemming.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| !s.is_empty())
        .filter(|s| !STOP_WORDS.contains(s))
        .map(stem_simple)
        .collect()
}

/// Simple plural stemmer for indexing.
///
/// Handles common English plural forms:
/// - "hammers" -> "hammer" (strip -s)
/// - "batteries" -> "battery" (ies -> y)
/// - "boxes" -> "box" (strip -es after x/z)
///
/// This is intentionally simple - it improves recall for plural/singular
/// matching without the complexity of a full Porter stemmer.
fn stem_simple(term: &str) -> String {
    let t = term.to_string();
    let len = t.len();

    // Skip very short terms
    if len < 3 {
        return t;
    }

    // Handle -ies -> -y (batteries -> battery, pliers stays via -s rule)
    if len > 3 && t.ends_with("ies") {
        return format!("{}y", &t[..len - 3]);
    }

    // Handle -xes -> -x and -zes -> -z (boxes -> box)
    if len > 3 && (t.ends_with("xes") || t.ends_with("zes")) {
        return t[..len - 2].to_string();
    }

    // Handle -sses -> -ss (glasses -> glass, but keep the ss)
    if len > 4 && t.ends_with("sses") {
        return t[..len - 2].to_string();
    }

    // Handle -shes -> -sh (brushes -> brush)
    if len > 4 && t.ends_with("shes") {
        return t[..len - 2].to_string();
    }

    // Handle simple -s (but not -ss like "glass", "harness")
    if t.ends_with('s') && !t.ends_with("ss") {
        return t[..len - 1].to_string();
    }

    t
}
