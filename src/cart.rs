//! Carts

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::products::{Product, ProductId};

/// A product line in a cart.
///
/// At most one line exists per product id; quantities below one are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product this line refers to
    pub product: Product,

    /// Number of units of the product
    pub quantity: u64,
}

impl CartItem {
    /// Cost of the line in minor units.
    pub fn line_total(&self) -> u64 {
        self.quantity * self.product.price
    }
}

/// Cart
///
/// The aggregate fields are derived from `items` and recomputed after every mutation via
/// [`recalculate`](Cart::recalculate); they are never patched incrementally. Field names
/// serialize camelCase to stay byte-compatible with the storefront's persisted snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart lines, unique by product id.
    #[serde(default)]
    pub items: SmallVec<[CartItem; 4]>,

    /// Sum of line quantities.
    #[serde(default)]
    pub total_items: u64,

    /// Sum of line totals in minor units.
    #[serde(default)]
    pub total_amount: u64,
}

impl Cart {
    /// An empty cart with zeroed aggregates.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up the line for a product, if present.
    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|line| line.product.id == product_id)
    }

    /// Number of distinct product lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Recompute the derived aggregates from the lines.
    ///
    /// Lines whose quantity has reached zero are dropped rather than stored.
    pub fn recalculate(&mut self) {
        self.items.retain(|line| line.quantity > 0);
        self.total_items = self.items.iter().map(|line| line.quantity).sum();
        self.total_amount = self.items.iter().map(CartItem::line_total).sum();
    }
}
