//! File-backed store

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::warn;

use crate::storage::SnapshotStore;

/// Errors opening a [`FileStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage directory could not be created.
    #[error("failed to create storage directory")]
    Io(#[from] io::Error),
}

/// One-file-per-key snapshot store rooted at a directory.
///
/// The durable equivalent of a browser origin's local storage for native hosts. Keys map
/// directly to file names; the key alphabet used by this crate (`cart_guest`,
/// `cart_user_<id>`, `current_user`, `auth_token`) is filesystem-safe by construction.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory the store persists into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl SnapshotStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match fs::write(self.path_for(key), value) {
            Ok(()) => true,
            Err(err) => {
                warn!(key, %err, "snapshot write failed");
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => true,
            Err(err) if err.kind() == io::ErrorKind::NotFound => true,
            Err(err) => {
                warn!(key, %err, "snapshot removal failed");
                false
            }
        }
    }
}
