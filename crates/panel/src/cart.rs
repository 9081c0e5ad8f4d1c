//! Client-side shopping cart.
//!
//! The cart is a JSON list of [`CartEntry`] kept under a single device-scoped
//! key. It is never sent to the backend and there is no removal or checkout.

use tracing::instrument;

use catalog_panel_core::{CartEntry, ProductId};

use crate::storage::{Scope, Storage, StorageError};

/// Storage key holding the cart.
pub const CART_KEY: &str = "cart";

/// Reads and writes the cart held in [`Storage`].
#[derive(Debug, Clone)]
pub struct CartManager {
    storage: Storage,
}

impl CartManager {
    /// Create a cart manager over `storage`.
    #[must_use]
    pub const fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Current cart entries in insertion order.
    ///
    /// A missing or unreadable cart value reads as empty.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be read.
    pub fn entries(&self) -> Result<Vec<CartEntry>, StorageError> {
        let Some(raw) = self.storage.get(Scope::Device, CART_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable cart");
                Ok(Vec::new())
            }
        }
    }

    /// Add one unit of `id`, merging with an existing entry.
    ///
    /// Returns the new total quantity.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be read or written.
    #[instrument(skip(self))]
    pub fn add_to_cart(&self, id: ProductId) -> Result<u32, StorageError> {
        let mut entries = self.entries()?;

        match entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(1),
            None => entries.push(CartEntry::single(id)),
        }

        self.storage
            .set(Scope::Device, CART_KEY, &serde_json::to_string(&entries)?)?;

        let count = total_quantity(&entries);
        tracing::debug!(%id, count, "Added to cart");
        Ok(count)
    }

    /// Total quantity across all entries.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be read.
    pub fn count(&self) -> Result<u32, StorageError> {
        Ok(total_quantity(&self.entries()?))
    }
}

fn total_quantity(entries: &[CartEntry]) -> u32 {
    entries
        .iter()
        .fold(0u32, |sum, entry| sum.saturating_add(entry.quantity))
}
