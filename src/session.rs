//! Session identity

use std::fmt;

/// Storage key backing the unauthenticated cart slot.
pub const GUEST_CART_KEY: &str = "cart_guest";

/// The browsing identity the active cart is keyed by.
///
/// Exactly one cart is active at a time, and each identity maps to at most one persisted
/// snapshot in durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionId {
    /// Unauthenticated browsing, backed by the fixed guest slot.
    Guest,

    /// An authenticated user, by backend id.
    User(u64),
}

impl SessionId {
    /// The durable-store key backing this identity's cart.
    pub fn storage_key(self) -> String {
        match self {
            Self::Guest => GUEST_CART_KEY.to_owned(),
            Self::User(id) => format!("cart_user_{id}"),
        }
    }

    /// True for the unauthenticated identity.
    pub fn is_guest(self) -> bool {
        matches!(self, Self::Guest)
    }
}

impl From<Option<u64>> for SessionId {
    /// No authenticated user resolves to the guest identity.
    fn from(user_id: Option<u64>) -> Self {
        user_id.map_or(Self::Guest, Self::User)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guest => write!(f, "guest"),
            Self::User(id) => write!(f, "user:{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_uses_the_fixed_slot() {
        assert_eq!(SessionId::Guest.storage_key(), "cart_guest");
        assert!(SessionId::Guest.is_guest());
    }

    #[test]
    fn users_get_partitioned_slots() {
        assert_eq!(SessionId::User(42).storage_key(), "cart_user_42");
        assert!(!SessionId::User(42).is_guest());
    }

    #[test]
    fn absent_user_id_is_guest() {
        assert_eq!(SessionId::from(None), SessionId::Guest);
        assert_eq!(SessionId::from(Some(7)), SessionId::User(7));
    }

    #[test]
    fn display_matches_identity_vocabulary() {
        assert_eq!(SessionId::Guest.to_string(), "guest");
        assert_eq!(SessionId::User(3).to_string(), "user:3");
    }
}
