//! Cart collaborator boundary types.
//!
//! The engine never owns cart persistence; callers hand it a value-typed
//! snapshot of a cart and get recommendations back. Only the most recently
//! added line influences the result.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductId;

/// A single cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// A cart snapshot, lines in insertion order (oldest first).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The most recently added line, if any.
    pub fn last_added(&self) -> Option<&CartLine> {
        self.lines.last()
    }
}
