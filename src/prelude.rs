//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{AuthSession, UserProfile, UserRole},
    cart::{Cart, CartItem},
    context::StorefrontContext,
    fixtures::{Fixture, FixtureError},
    manager::{CartManager, SubscriptionKey},
    products::{Product, ProductId},
    session::SessionId,
    storage::{FileStore, MemoryStore, SnapshotStore, StoreError},
    summary::{CartSummary, SummaryError},
};
