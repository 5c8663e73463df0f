//! Authentication session collaborator.
//!
//! A thin pass-through around the identity the backend has already authenticated: it
//! persists the active profile and opaque bearer token, and reports login/admin state.
//! Credential validation and the HTTP calls that produce profiles live outside this
//! crate.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::SnapshotStore;

/// Storage key holding the active user profile.
pub const CURRENT_USER_KEY: &str = "current_user";

/// Storage key holding the opaque bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Role attached to a storefront account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Admin-console access.
    Admin,

    /// Regular storefront account.
    User,
}

/// Profile persisted under [`CURRENT_USER_KEY`].
///
/// Field names serialize camelCase to stay byte-compatible with profiles the storefront
/// already persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Backend user id.
    pub id: u64,

    /// Account email.
    pub email: String,

    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Account role.
    pub role: UserRole,

    /// Contact number, when the account has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// State or region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    /// Country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Authentication session state.
///
/// Owns the `current_user` and `auth_token` storage slots. The in-memory profile is
/// authoritative for the process lifetime even when persistence is degraded.
pub struct AuthSession {
    store: Rc<dyn SnapshotStore>,
    current: Option<UserProfile>,
}

impl AuthSession {
    /// Restore the session persisted in `store`, if any.
    ///
    /// A missing or undecodable profile reads as signed-out.
    pub fn new(store: Rc<dyn SnapshotStore>) -> Self {
        let current = store
            .get(CURRENT_USER_KEY)
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok());

        Self { store, current }
    }

    /// The signed-in profile, if any.
    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current.as_ref()
    }

    /// True when a profile is active.
    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// True when the active profile carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|user| user.role == UserRole::Admin)
    }

    /// The persisted bearer token, passed through untouched.
    pub fn token(&self) -> Option<String> {
        self.store.get(AUTH_TOKEN_KEY)
    }

    /// Activate `profile` after the backend accepted its credentials.
    ///
    /// Profile and token are persisted best-effort; the in-memory session is
    /// authoritative either way.
    pub fn sign_in(&mut self, profile: UserProfile, token: &str) {
        match serde_json::to_string(&profile) {
            Ok(raw) => {
                if !self.store.set(CURRENT_USER_KEY, &raw) {
                    warn!(user = profile.id, "profile write failed; session kept in memory");
                }
            }
            Err(err) => warn!(user = profile.id, %err, "profile could not be encoded"),
        }

        if !self.store.set(AUTH_TOKEN_KEY, token) {
            warn!(user = profile.id, "token write failed");
        }

        debug!(user = profile.id, "session established");
        self.current = Some(profile);
    }

    /// Drop the active session and its persisted keys.
    pub fn sign_out(&mut self) {
        self.store.remove(CURRENT_USER_KEY);
        self.store.remove(AUTH_TOKEN_KEY);
        self.current = None;
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
