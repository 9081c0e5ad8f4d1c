//! Core types for the catalog panel.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use cart::CartEntry;
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use status::{ProductStatus, Role};
