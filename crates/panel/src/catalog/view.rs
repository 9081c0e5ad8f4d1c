//! Pure product-to-view-model transformations.
//!
//! Nothing here touches the network or the UI; adapters take these models
//! and draw them.

use catalog_panel_core::{Product, ProductId, ProductStatus, Role};

/// Label on the add-to-cart control of an available product.
pub const ADD_TO_CART_LABEL: &str = "Add to cart";

/// Label on the add-to-cart control of a product with no stock.
pub const OUT_OF_STOCK_LABEL: &str = "Out of stock";

/// The add-to-cart control on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartButton {
    pub label: &'static str,
    pub disabled: bool,
}

/// A card in the shopper's product grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    /// Product image, or the fallback when the product has none.
    pub image_url: String,
    /// Image to swap in if `image_url` fails to load.
    pub fallback_image_url: String,
    /// Formatted price, e.g. `R$ 19.90`.
    pub price: String,
    pub stock: u32,
    pub button: CartButton,
}

impl ProductCard {
    /// Product to add when the card's button is pressed, or `None` when the
    /// button is disabled.
    #[must_use]
    pub const fn add_to_cart_target(&self) -> Option<ProductId> {
        if self.button.disabled {
            None
        } else {
            Some(self.id)
        }
    }
}

/// A row in the admin management list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminProductRow {
    pub id: ProductId,
    pub name: String,
    /// Formatted price, e.g. `R$ 19.90`.
    pub price: String,
    pub stock: u32,
    pub status: ProductStatus,
}

impl AdminProductRow {
    /// `Active` or `Inactive`.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        self.status.label()
    }
}

/// Rendered catalog for one of the two panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogView {
    /// Shopper grid.
    Grid(Vec<ProductCard>),
    /// Admin management list.
    Management(Vec<AdminProductRow>),
}

impl CatalogView {
    /// Number of products rendered.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Grid(cards) => cards.len(),
            Self::Management(rows) => rows.len(),
        }
    }

    /// Whether no products were rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Build the shopper grid.
#[must_use]
pub fn render_user_products(products: &[Product], fallback_image_url: &str) -> Vec<ProductCard> {
    products
        .iter()
        .map(|product| {
            let button = if product.in_stock() {
                CartButton {
                    label: ADD_TO_CART_LABEL,
                    disabled: false,
                }
            } else {
                CartButton {
                    label: OUT_OF_STOCK_LABEL,
                    disabled: true,
                }
            };

            ProductCard {
                id: product.id,
                name: product.name.clone(),
                image_url: product
                    .image_url
                    .clone()
                    .unwrap_or_else(|| fallback_image_url.to_string()),
                fallback_image_url: fallback_image_url.to_string(),
                price: product.unit_price().display(),
                stock: product.quantity,
                button,
            }
        })
        .collect()
}

/// Build the admin management list.
#[must_use]
pub fn render_admin_products(products: &[Product]) -> Vec<AdminProductRow> {
    products
        .iter()
        .map(|product| AdminProductRow {
            id: product.id,
            name: product.name.clone(),
            price: product.unit_price().display(),
            stock: product.quantity,
            status: product.status,
        })
        .collect()
}

/// Render for the given cached role; no cached role renders the shopper grid.
#[must_use]
pub fn render_for_role(
    role: Option<Role>,
    products: &[Product],
    fallback_image_url: &str,
) -> CatalogView {
    match role {
        Some(Role::Admin) => CatalogView::Management(render_admin_products(products)),
        Some(Role::User) | None => {
            CatalogView::Grid(render_user_products(products, fallback_image_url))
        }
    }
}
