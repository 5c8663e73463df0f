//! Cart snapshots
//!
//! Serialization boundary between in-memory carts and the snapshot store. Decoding is
//! deliberately tolerant: any malformed, truncated, or absent input reads as "no
//! snapshot", never as an error, and the caller falls back to an empty cart.

use crate::cart::Cart;

/// Serialize a cart for durable storage.
///
/// Returns `None` when serialization itself fails; callers treat that as a failed
/// best-effort write.
pub fn encode(cart: &Cart) -> Option<String> {
    serde_json::to_string(cart).ok()
}

/// Parse a stored snapshot.
pub fn decode(raw: &str) -> Option<Cart> {
    serde_json::from_str(raw).ok()
}
