//! Storefront context.

use std::rc::Rc;

use crate::{
    auth::{AuthSession, UserProfile},
    manager::CartManager,
    session::SessionId,
    storage::SnapshotStore,
};

/// Composition root for a storefront process.
///
/// Built once at application start and passed explicitly to consumers. Construction,
/// sign-in, registration, and sign-out are the only paths that change the active
/// identity, so the cart manager sees exactly one
/// [`set_active_session`](CartManager::set_active_session) call per transition. Views
/// talk to `carts` and `auth`; the snapshot store itself stays behind them.
#[derive(Debug)]
pub struct StorefrontContext {
    /// Cart state manager for the active session.
    pub carts: CartManager,

    /// Authentication collaborator.
    pub auth: AuthSession,
}

impl StorefrontContext {
    /// Build the context over `store` and activate the persisted identity, if any.
    pub fn new(store: Rc<dyn SnapshotStore>) -> Self {
        let auth = AuthSession::new(Rc::clone(&store));
        let mut carts = CartManager::new(store);

        carts.set_active_session(SessionId::from(auth.current_user().map(|user| user.id)));

        Self { carts, auth }
    }

    /// Activate `profile` after a successful login.
    pub fn sign_in(&mut self, profile: UserProfile, token: &str) {
        let session = SessionId::User(profile.id);
        self.auth.sign_in(profile, token);
        self.carts.set_active_session(session);
    }

    /// Activate `profile` after a successful registration.
    ///
    /// Registration behaves as a login for session purposes.
    pub fn register(&mut self, profile: UserProfile, token: &str) {
        self.sign_in(profile, token);
    }

    /// Drop the active identity and return to guest browsing.
    pub fn sign_out(&mut self) {
        self.auth.sign_out();
        self.carts.set_active_session(SessionId::Guest);
    }
}
