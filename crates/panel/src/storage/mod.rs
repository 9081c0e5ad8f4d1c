//! Persistent key/value storage with two scopes.
//!
//! The panel keeps its state in two stores:
//!
//! - [`Scope::Session`] - cleared when the user's session ends
//! - [`Scope::Device`] - survives until explicitly cleared
//!
//! Reads that consult both scopes prefer the session scope. Backends
//! implement [`KeyValueStore`]; [`MemoryStore`] is used in tests and
//! [`FileStore`] persists to a JSON file on disk.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur when reading or writing a store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// A string key/value store.
///
/// Every write replaces the whole value for its key; there is no merge or
/// conflict detection between concurrent writers.
pub trait KeyValueStore: Send + Sync {
    /// Get the value for `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Set `key` to `value`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Which store a value lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Cleared when the session ends.
    Session,
    /// Survives across sessions.
    Device,
}

/// The pair of stores backing a panel instance.
///
/// Cheaply cloneable; clones share the same backends.
#[derive(Clone)]
pub struct Storage {
    session: Arc<dyn KeyValueStore>,
    device: Arc<dyn KeyValueStore>,
}

impl Storage {
    /// Create storage from a session-scoped and a device-scoped store.
    #[must_use]
    pub fn new(session: Arc<dyn KeyValueStore>, device: Arc<dyn KeyValueStore>) -> Self {
        Self { session, device }
    }

    /// Storage backed by two independent in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    fn store(&self, scope: Scope) -> &dyn KeyValueStore {
        match scope {
            Scope::Session => self.session.as_ref(),
            Scope::Device => self.device.as_ref(),
        }
    }

    /// Read `key` from a single scope.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    pub fn get(&self, scope: Scope, key: &str) -> Result<Option<String>, StorageError> {
        self.store(scope).get(key)
    }

    /// Write `key` into a single scope.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be written.
    pub fn set(&self, scope: Scope, key: &str, value: &str) -> Result<(), StorageError> {
        self.store(scope).set(key, value)
    }

    /// Remove `key` from a single scope.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be written.
    pub fn remove(&self, scope: Scope, key: &str) -> Result<(), StorageError> {
        self.store(scope).remove(key)
    }

    /// Read `key`, preferring the session scope over the device scope.
    ///
    /// # Errors
    ///
    /// Returns error if either store cannot be read.
    pub fn get_preferred(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.session.get(key)? {
            Some(value) => Ok(Some(value)),
            None => self.device.get(key),
        }
    }

    /// Write `key` into both scopes.
    ///
    /// # Errors
    ///
    /// Returns error if either store cannot be written.
    pub fn set_both(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.session.set(key, value)?;
        self.device.set(key, value)
    }

    /// Remove `key` from both scopes.
    ///
    /// # Errors
    ///
    /// Returns error if either store cannot be written.
    pub fn remove_both(&self, key: &str) -> Result<(), StorageError> {
        self.session.remove(key)?;
        self.device.remove(key)
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}
