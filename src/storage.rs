//! Snapshot storage
//!
//! Durable string-keyed, string-valued persistence seam, mirroring a browser origin's
//! local storage. Reads that fail for any reason surface as `None`; writes and removals
//! report success as a plain `bool` and are never retried.

use mockall::automock;

mod file;
mod memory;

pub use file::{FileStore, StoreError};
pub use memory::MemoryStore;

/// Durable per-key snapshot store.
///
/// Implementations are best-effort: a failed write leaves the in-memory state of callers
/// authoritative for the rest of the process lifetime.
#[automock]
pub trait SnapshotStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, returning whether the write took effect.
    fn set(&self, key: &str, value: &str) -> bool;

    /// Remove any value stored under `key`, returning whether the removal took effect.
    /// Removing an absent key counts as success.
    fn remove(&self, key: &str) -> bool;
}
