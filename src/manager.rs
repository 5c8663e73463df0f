//! Cart state manager.

use std::fmt;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartItem},
    products::{Product, ProductId},
    session::{GUEST_CART_KEY, SessionId},
    snapshot,
    storage::SnapshotStore,
};

new_key_type! {
    /// Subscription Key
    pub struct SubscriptionKey;
}

type Observer = Box<dyn FnMut(&Cart)>;

/// Cart State Manager
///
/// Owns the in-memory active cart, the storage key backing it, and the guest-to-user
/// migration policy. All operations run synchronously to completion; observers are
/// notified after every publish, and a new subscriber immediately receives the latest
/// cart rather than waiting for the next mutation.
///
/// Storage access is best-effort throughout: a missing or undecodable snapshot reads as
/// an empty cart, and a failed write leaves the in-memory cart authoritative for the rest
/// of the process lifetime. Nothing here propagates an error to a caller.
pub struct CartManager {
    store: Rc<dyn SnapshotStore>,
    active_key: String,
    current: Cart,
    observers: SlotMap<SubscriptionKey, Observer>,
}

impl CartManager {
    /// Create a manager over `store`, starting on the guest slot.
    ///
    /// Call [`set_active_session`](Self::set_active_session) once afterwards with the
    /// bootstrapped identity; [`crate::context::StorefrontContext`] wires this up.
    pub fn new(store: Rc<dyn SnapshotStore>) -> Self {
        let current = store
            .get(GUEST_CART_KEY)
            .as_deref()
            .and_then(snapshot::decode)
            .unwrap_or_default();

        Self {
            store,
            active_key: GUEST_CART_KEY.to_owned(),
            current,
            observers: SlotMap::with_key(),
        }
    }

    /// Switch the active cart to `session`'s storage slot.
    ///
    /// Call exactly once per identity transition: at process start with the persisted
    /// identity (if any), on successful login or registration, and on logout.
    ///
    /// A guest cart migrates into the user slot only on a guest-to-login transition where
    /// the guest cart has at least one item and the user slot is empty or absent; the
    /// guest slot is reset afterwards so it cannot leak into a later session. In every
    /// other case the destination cart wins and pending guest items are discarded.
    /// Whenever the destination is the guest identity, the guest slot is reset before
    /// loading, so nothing survives a logout/login cycle of different identities.
    pub fn set_active_session(&mut self, session: SessionId) {
        let prev_was_guest = self.active_key == GUEST_CART_KEY;
        self.active_key = session.storage_key();

        if prev_was_guest && !session.is_guest() {
            let user_key = self.active_key.clone();
            self.merge_guest_into(&user_key);
        }

        if session.is_guest() {
            self.persist(GUEST_CART_KEY, &Cart::empty());
        }

        debug!(session = %session, key = %self.active_key, "activating cart slot");

        let next = self.load(&self.active_key);
        self.publish(next);
    }

    /// The current cart. A snapshot, not a live reference: mutation goes through the
    /// operations on this manager.
    pub fn current_cart(&self) -> Cart {
        self.current.clone()
    }

    /// `total_items` of the current cart.
    pub fn item_count(&self) -> u64 {
        self.current.total_items
    }

    /// Add `quantity` units of `product`, merging into an existing line for the same
    /// product if there is one.
    ///
    /// No upper bound is enforced here; stock limits are a caller concern.
    pub fn add_item(&mut self, product: Product, quantity: u64) {
        let mut cart = self.current.clone();

        match cart
            .items
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            Some(line) => line.quantity += quantity,
            None => cart.items.push(CartItem { product, quantity }),
        }

        self.recalculate_and_save(cart);
    }

    /// Drop the line for `product_id`.
    ///
    /// Republishes even when the product was not in the cart.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let mut cart = self.current.clone();
        cart.items.retain(|line| line.product.id != product_id);

        self.recalculate_and_save(cart);
    }

    /// Set the line for `product_id` to exactly `quantity`; zero removes the line.
    ///
    /// Products not in the cart are left untouched (no republish).
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u64) {
        let mut cart = self.current.clone();

        let Some(line) = cart
            .items
            .iter_mut()
            .find(|line| line.product.id == product_id)
        else {
            return;
        };

        // Zero-quantity lines are dropped by the recalculation pass.
        line.quantity = quantity;

        self.recalculate_and_save(cart);
    }

    /// Reset the active slot to an empty cart, persist, publish.
    pub fn clear(&mut self) {
        let empty = Cart::empty();
        self.persist(&self.active_key, &empty);
        self.publish(empty);
    }

    /// Attach `observer` to the cart stream.
    ///
    /// The latest cart is replayed immediately; afterwards the observer runs on every
    /// publish until [`unsubscribe`](Self::unsubscribe)d.
    pub fn subscribe(&mut self, mut observer: impl FnMut(&Cart) + 'static) -> SubscriptionKey {
        observer(&self.current);
        self.observers.insert(Box::new(observer))
    }

    /// Attach a `total_items` projection of the cart stream, for lightweight badge
    /// consumers.
    pub fn subscribe_item_count(
        &mut self,
        mut observer: impl FnMut(u64) + 'static,
    ) -> SubscriptionKey {
        self.subscribe(move |cart| observer(cart.total_items))
    }

    /// Detach a previously attached observer.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) {
        self.observers.remove(key);
    }

    fn merge_guest_into(&mut self, user_key: &str) {
        let guest = self.load_optional(GUEST_CART_KEY);
        let user = self.load_optional(user_key);

        let guest_has_items = guest.as_ref().is_some_and(|cart| !cart.is_empty());
        let user_is_empty = user.as_ref().is_none_or(Cart::is_empty);

        let Some(guest) = guest else { return };

        if guest_has_items && user_is_empty {
            debug!(items = guest.total_items, key = user_key, "migrating guest cart");
            self.persist(user_key, &guest);
            self.persist(GUEST_CART_KEY, &Cart::empty());
        } else if guest_has_items {
            // Destination already has items: it wins, and the pending guest lines are
            // dropped with no user-visible warning.
            warn!(
                discarded = guest.total_items,
                key = user_key,
                "guest cart discarded on login"
            );
        }
    }

    fn load_optional(&self, key: &str) -> Option<Cart> {
        self.store.get(key).as_deref().and_then(snapshot::decode)
    }

    fn load(&self, key: &str) -> Cart {
        self.load_optional(key).unwrap_or_default()
    }

    fn persist(&self, key: &str, cart: &Cart) {
        let Some(raw) = snapshot::encode(cart) else {
            warn!(key, "cart snapshot could not be encoded");
            return;
        };

        if !self.store.set(key, &raw) {
            warn!(key, "cart snapshot write failed; in-memory cart stays authoritative");
        }
    }

    fn recalculate_and_save(&mut self, mut cart: Cart) {
        cart.recalculate();
        self.persist(&self.active_key, &cart);
        self.publish(cart);
    }

    fn publish(&mut self, cart: Cart) {
        self.current = cart;

        for observer in self.observers.values_mut() {
            observer(&self.current);
        }
    }
}

impl fmt::Debug for CartManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("active_key", &self.active_key)
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::storage::MemoryStore;

    use super::*;

    fn product(id: u64, price: u64) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Product {id}"),
            description: String::new(),
            category: String::new(),
            price,
            stock: 10,
        }
    }

    fn manager() -> (Rc<MemoryStore>, CartManager) {
        let store = Rc::new(MemoryStore::new());
        let manager = CartManager::new(Rc::clone(&store) as Rc<dyn SnapshotStore>);
        (store, manager)
    }

    #[test]
    fn add_item_appends_and_recalculates() {
        let (_store, mut manager) = manager();

        manager.add_item(product(7, 10_00), 2);

        let cart = manager.current_cart();
        assert_eq!(cart.total_items, 2);
        assert_eq!(cart.total_amount, 20_00);
    }

    #[test]
    fn add_item_merges_lines_for_the_same_product() {
        let (_store, mut manager) = manager();

        manager.add_item(product(7, 10_00), 2);
        manager.add_item(product(7, 10_00), 1);

        let cart = manager.current_cart();
        assert_eq!(cart.len(), 1, "one line per product id");
        assert_eq!(cart.item(ProductId(7)).map(|line| line.quantity), Some(3));
    }

    #[test]
    fn update_quantity_sets_exactly() {
        let (_store, mut manager) = manager();

        manager.add_item(product(7, 10_00), 2);
        manager.update_quantity(ProductId(7), 5);

        let cart = manager.current_cart();
        assert_eq!(cart.total_items, 5);
        assert_eq!(cart.total_amount, 50_00);
    }

    #[test]
    fn update_quantity_zero_removes_the_line() {
        let (_store, mut manager) = manager();

        manager.add_item(product(7, 10_00), 4);
        manager.update_quantity(ProductId(7), 0);

        assert!(manager.current_cart().is_empty());
        assert_eq!(manager.item_count(), 0);
    }

    #[test]
    fn update_quantity_of_absent_product_does_not_republish() {
        let (_store, mut manager) = manager();
        let publishes = Rc::new(Cell::new(0_u32));

        let seen = Rc::clone(&publishes);
        manager.subscribe(move |_| seen.set(seen.get() + 1));
        assert_eq!(publishes.get(), 1, "replay counts as one delivery");

        manager.update_quantity(ProductId(404), 3);

        assert_eq!(publishes.get(), 1);
    }

    #[test]
    fn remove_item_republishes_even_when_absent() {
        let (_store, mut manager) = manager();
        let publishes = Rc::new(Cell::new(0_u32));

        let seen = Rc::clone(&publishes);
        manager.subscribe(move |_| seen.set(seen.get() + 1));

        manager.remove_item(ProductId(404));

        assert_eq!(publishes.get(), 2);
    }

    #[test]
    fn clear_resets_slot_and_memory() {
        let (store, mut manager) = manager();

        manager.add_item(product(7, 10_00), 2);
        manager.clear();

        assert!(manager.current_cart().is_empty());

        let stored = store.get(GUEST_CART_KEY).expect("slot should be written");
        assert_eq!(snapshot::decode(&stored), Some(Cart::empty()));
    }

    #[test]
    fn mutations_persist_to_the_active_slot() {
        let (store, mut manager) = manager();

        manager.add_item(product(7, 10_00), 2);

        let stored = store.get(GUEST_CART_KEY).expect("slot should be written");
        let cart = snapshot::decode(&stored).expect("snapshot should decode");
        assert_eq!(cart.total_amount, 20_00);
    }

    #[test]
    fn subscriber_replays_latest_value_immediately() {
        let (_store, mut manager) = manager();

        manager.add_item(product(7, 10_00), 2);

        let seen = Rc::new(Cell::new(0_u64));
        let sink = Rc::clone(&seen);
        manager.subscribe(move |cart| sink.set(cart.total_items));

        assert_eq!(seen.get(), 2, "subscriber attached late still sees the cart");
    }

    #[test]
    fn unsubscribed_observer_receives_nothing_further() {
        let (_store, mut manager) = manager();
        let publishes = Rc::new(Cell::new(0_u32));

        let seen = Rc::clone(&publishes);
        let key = manager.subscribe(move |_| seen.set(seen.get() + 1));

        manager.unsubscribe(key);
        manager.add_item(product(7, 10_00), 1);

        assert_eq!(publishes.get(), 1, "only the replay was delivered");
    }

    #[test]
    fn item_count_projection_tracks_totals() {
        let (_store, mut manager) = manager();
        let badge = Rc::new(Cell::new(0_u64));

        let sink = Rc::clone(&badge);
        manager.subscribe_item_count(move |count| sink.set(count));

        manager.add_item(product(7, 10_00), 2);
        assert_eq!(badge.get(), 2);

        manager.add_item(product(8, 5_00), 1);
        assert_eq!(badge.get(), 3);

        manager.remove_item(ProductId(7));
        assert_eq!(badge.get(), 1);
    }

    #[test]
    fn corrupt_snapshot_reads_as_empty_cart() {
        let store = Rc::new(MemoryStore::new());
        store.set(GUEST_CART_KEY, "definitely not json");

        let manager = CartManager::new(store as Rc<dyn SnapshotStore>);

        assert!(manager.current_cart().is_empty());
    }
}
