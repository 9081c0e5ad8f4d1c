//! Catalog commands.
//!
//! Every command except `preview` runs the access check first, exactly as the
//! panel does on page load. Product management additionally requires the
//! admin view.

use std::path::{Path, PathBuf};

use catalog_panel::api::CatalogClient;
use catalog_panel::config::PanelConfig;
use catalog_panel::{Panel, PanelView};
use catalog_panel_core::ProductId;

use super::{CommandError, open_panel};
use crate::ui::TerminalUi;

/// Field values for `product save`, entered as on the product form.
#[derive(Debug)]
pub struct ProductFields {
    pub id: Option<ProductId>,
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub status: String,
    pub image: Option<PathBuf>,
}

/// Check access, then list the catalog for the resulting role.
pub async fn list(config: &PanelConfig) -> Result<(), CommandError> {
    let mut panel = open_panel(config, false)?;
    panel.update_cart_count()?;
    panel.check_admin_status().await?;
    panel.load_products().await?;
    Ok(())
}

/// Load a product into the form and print it.
pub async fn show(config: &PanelConfig, id: ProductId) -> Result<(), CommandError> {
    let mut panel = admin_panel(config, false).await?;
    panel.edit_product(id).await?;
    Ok(())
}

/// Create or update a product from `fields`.
pub async fn save(config: &PanelConfig, fields: ProductFields) -> Result<(), CommandError> {
    let mut panel = admin_panel(config, false).await?;

    let form = panel.form_mut();
    form.editing_id = fields.id;
    form.name = fields.name;
    form.price = fields.price;
    form.quantity = fields.quantity;
    form.status = fields.status;

    if let Some(path) = fields.image.as_deref() {
        panel.select_image(Some(path))?;
    }

    panel.submit_product_form().await?;
    Ok(())
}

/// Delete a product, prompting unless `assume_yes`.
pub async fn delete(
    config: &PanelConfig,
    id: ProductId,
    assume_yes: bool,
) -> Result<(), CommandError> {
    let mut panel = admin_panel(config, assume_yes).await?;
    if !panel.delete_product(id).await? {
        tracing::info!(%id, "Delete cancelled");
    }
    Ok(())
}

/// Show the thumbnail an image file would get on the product form.
pub fn preview(config: &PanelConfig, path: &Path) -> Result<(), CommandError> {
    let mut panel = open_panel(config, false)?;
    panel.select_image(Some(path))?;
    Ok(())
}

/// Open a panel and require the admin view.
async fn admin_panel(
    config: &PanelConfig,
    assume_yes: bool,
) -> Result<Panel<CatalogClient, TerminalUi>, CommandError> {
    let mut panel = open_panel(config, assume_yes)?;
    match panel.check_admin_status().await? {
        PanelView::Admin => Ok(panel),
        PanelView::User => Err(CommandError::AdminRequired),
    }
}
