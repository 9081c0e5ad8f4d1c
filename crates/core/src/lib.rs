//! Catalog Panel Core - Shared types library.
//!
//! This crate provides common types used across all catalog panel components:
//! - `panel` - Session, access gate, catalog and cart client library
//! - `cli` - Terminal front end for the panel
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, statuses, products and cart lines

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
