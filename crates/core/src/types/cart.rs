//! Client-side cart line.

use serde::{Deserialize, Serialize};

use super::ProductId;

/// One line of the client-side cart.
///
/// Serialized as `{"id": 42, "quantity": 2}`; a cart is an ordered list of
/// entries with unique ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: ProductId,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartEntry {
    /// A fresh entry holding a single unit.
    #[must_use]
    pub const fn single(id: ProductId) -> Self {
        Self { id, quantity: 1 }
    }
}
