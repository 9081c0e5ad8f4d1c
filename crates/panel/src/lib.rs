//! Catalog Panel library.
//!
//! Client side of a small product catalog: session handling, the admin/user
//! access gate, catalog rendering and product management, and a local cart.
//! All backend access goes through the [`api::CatalogApi`] trait and all
//! drawing through the [`ui::PanelUi`] trait, so the logic here runs the same
//! under the terminal front end and under test doubles.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`storage`] - Session- and device-scoped key/value stores
//! - [`session`] - Token, login time and cached role
//! - [`api`] - Backend REST client
//! - [`gate`] - Access check and view selection
//! - [`catalog`] - View models, product form and image preview
//! - [`cart`] - Client-side cart
//! - [`panel`] - The application instance tying these together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gate;
pub mod panel;
pub mod session;
pub mod storage;
pub mod ui;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod testing;

pub use error::{PanelError, Result};
pub use gate::PanelView;
pub use panel::Panel;
pub use ui::PanelUi;
