//! The view-update adapter.
//!
//! [`PanelUi`] is the only place the panel reaches the screen. It receives
//! finished view models and user-facing messages; it holds no catalog,
//! session or cart logic of its own.

use crate::catalog::{CatalogView, ProductForm};
use crate::gate::PanelView;

/// Imperative UI surface driven by [`crate::Panel`].
pub trait PanelUi {
    /// Show exactly one of the two panels.
    fn show_view(&mut self, view: PanelView);

    /// Draw the product grid or management list.
    fn render_catalog(&mut self, catalog: &CatalogView);

    /// Redraw the product form (fields, heading and preview).
    fn show_form(&mut self, form: &ProductForm);

    /// Update the cart count badge, if the UI has one.
    fn set_cart_count(&mut self, count: u32);

    /// Show a blocking notice.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    /// Leave the panel for the login view.
    fn navigate_to_login(&mut self);
}
