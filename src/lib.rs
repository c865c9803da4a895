//! Shoprec: content-based product recommendations.
//!
//! This library indexes a product catalog by its textual attributes and
//! serves relevance-ranked search, related-item lookups, and cart
//! recommendations. The binary crate adds the CLI (clap) on top.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod rank;
pub mod tfidf;
