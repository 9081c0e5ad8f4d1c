//! Cart commands.

use std::io::Write;

use catalog_panel::config::PanelConfig;
use catalog_panel_core::ProductId;

use super::{CommandError, open_panel};

/// Add one unit of `id` to the cart.
pub fn add(config: &PanelConfig, id: ProductId) -> Result<(), CommandError> {
    let mut panel = open_panel(config, false)?;
    panel.add_to_cart(id)?;
    Ok(())
}

/// Print every cart entry and the total.
pub fn show(config: &PanelConfig) -> Result<(), CommandError> {
    let mut panel = open_panel(config, false)?;
    let entries = panel.cart().entries()?;

    let mut out = std::io::stdout().lock();
    if entries.is_empty() {
        writeln!(out, "Cart is empty")?;
    }
    for entry in &entries {
        writeln!(out, "#{:<6} x{}", entry.id.as_i64(), entry.quantity)?;
    }
    drop(out);

    panel.update_cart_count()?;
    Ok(())
}
