//! Products

use std::fmt;

use serde::{Deserialize, Serialize};

/// Product identifier as issued by the catalog backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
///
/// A read-only catalog entry. The cart core consumes `id` and `price`; the remaining
/// fields ride along so persisted snapshots stay faithful to what the catalog served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product category
    #[serde(default)]
    pub category: String,

    /// Unit price in minor units (pence/cents)
    pub price: u64,

    /// Units available for sale
    #[serde(default)]
    pub stock: u64,
}
