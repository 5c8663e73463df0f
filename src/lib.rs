//! Trolley
//!
//! Trolley is a session-aware shopping cart state engine for storefront clients: cart
//! identity across guest and authenticated sessions, guest-to-user cart migration, durable
//! snapshots behind a pluggable key/value store, and a replay-latest stream of cart changes.

pub mod auth;
pub mod cart;
pub mod context;
pub mod fixtures;
pub mod manager;
pub mod prelude;
pub mod products;
pub mod session;
pub mod snapshot;
pub mod storage;
pub mod summary;
