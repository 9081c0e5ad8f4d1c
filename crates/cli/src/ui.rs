//! Terminal rendering of the panel.
//!
//! Output is plain text, one line per product. Write errors are ignored: a
//! closed stdout should not turn a successful backend call into a failure.

use std::io::{self, BufRead, Stdout, Write};

use catalog_panel::PanelUi;
use catalog_panel::PanelView;
use catalog_panel::catalog::preview::PREVIEW_MAX_WIDTH_PX;
use catalog_panel::catalog::{CatalogView, ImagePreview, ProductForm};

/// [`PanelUi`] that draws to a writer and prompts on stdin.
pub struct TerminalUi<W = Stdout> {
    out: W,
    assume_yes: bool,
}

impl TerminalUi {
    /// Draw to stdout. With `assume_yes`, confirmations are accepted without
    /// prompting.
    pub fn stdout(assume_yes: bool) -> Self {
        Self::new(io::stdout(), assume_yes)
    }
}

impl<W: Write> TerminalUi<W> {
    pub const fn new(out: W, assume_yes: bool) -> Self {
        Self { out, assume_yes }
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write> PanelUi for TerminalUi<W> {
    fn show_view(&mut self, view: PanelView) {
        self.line(match view {
            PanelView::Admin => "== Product management ==",
            PanelView::User => "== Products ==",
        });
    }

    fn render_catalog(&mut self, catalog: &CatalogView) {
        if catalog.is_empty() {
            self.line("No products");
            return;
        }

        match catalog {
            CatalogView::Grid(cards) => {
                for card in cards {
                    let line = format!(
                        "#{:<6} {:<30} {:>12}  stock {:<5} [{}]",
                        card.id.as_i64(),
                        card.name,
                        card.price,
                        card.stock,
                        card.button.label
                    );
                    self.line(&line);
                }
            }
            CatalogView::Management(rows) => {
                for row in rows {
                    let line = format!(
                        "#{:<6} {:<30} {:>12}  stock {:<5} {}",
                        row.id.as_i64(),
                        row.name,
                        row.price,
                        row.stock,
                        row.status_label()
                    );
                    self.line(&line);
                }
            }
        }
    }

    fn show_form(&mut self, form: &ProductForm) {
        // A blank form is the post-reset state; nothing worth printing.
        if *form == ProductForm::default() {
            return;
        }

        self.line(form.heading());
        if let Some(id) = form.editing_id {
            self.line(&format!("  id:       {id}"));
        }
        self.line(&format!("  name:     {}", form.name));
        self.line(&format!("  price:    {}", form.price));
        self.line(&format!("  quantity: {}", form.quantity));
        self.line(&format!("  status:   {}", form.status));
        if let Some(preview) = &form.preview {
            self.line(&format!("  preview:  {}", describe_preview(preview)));
        }
    }

    fn set_cart_count(&mut self, count: u32) {
        tracing::debug!(count, "Cart count");
        self.line(&format!("Cart: {count}"));
    }

    fn alert(&mut self, message: &str) {
        self.line(message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let _ = write!(self.out, "{message} [y/N] ");
        let _ = self.out.flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }

    fn navigate_to_login(&mut self) {
        self.line("Login required: run `catalog-cli session set-token <TOKEN>`");
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// One-line summary of a thumbnail; inline data URLs are far too long to
/// print.
fn describe_preview(preview: &ImagePreview) -> String {
    match preview {
        ImagePreview::Remote(url) => url.clone(),
        ImagePreview::Local(src) => {
            let mime = src
                .strip_prefix("data:")
                .and_then(|rest| rest.split(';').next())
                .unwrap_or("unknown");
            let encoded = src.split_once(',').map_or(0, |(_, data)| data.len());
            format!("local {mime}, {encoded} base64 chars, max width {PREVIEW_MAX_WIDTH_PX}px")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use catalog_panel::catalog::{render_admin_products, render_user_products};
    use catalog_panel_core::{Product, ProductId, ProductStatus};

    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product {
                id: ProductId::new(1),
                name: "Caneca".to_string(),
                price: "19.90".parse().unwrap(),
                quantity: 3,
                status: ProductStatus::Active,
                image_url: None,
            },
            Product {
                id: ProductId::new(2),
                name: "Camiseta".to_string(),
                price: "49".parse().unwrap(),
                quantity: 0,
                status: ProductStatus::Inactive,
                image_url: None,
            },
        ]
    }

    fn output(ui: TerminalUi<Vec<u8>>) -> String {
        String::from_utf8(ui.out).unwrap()
    }

    #[test]
    fn test_grid_lines() {
        let mut ui = TerminalUi::new(Vec::new(), false);
        ui.render_catalog(&CatalogView::Grid(render_user_products(&products(), "fb")));
        let text = output(ui);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines.first().unwrap().contains("Caneca"));
        assert!(lines.first().unwrap().contains("R$ 19.90"));
        assert!(lines.first().unwrap().ends_with("[Add to cart]"));
        assert!(lines.get(1).unwrap().ends_with("[Out of stock]"));
    }

    #[test]
    fn test_management_lines() {
        let mut ui = TerminalUi::new(Vec::new(), false);
        ui.render_catalog(&CatalogView::Management(render_admin_products(&products())));
        let text = output(ui);

        assert!(text.contains("Active"));
        assert!(text.contains("Inactive"));
        assert!(text.contains("R$ 49.00"));
    }

    #[test]
    fn test_empty_catalog() {
        let mut ui = TerminalUi::new(Vec::new(), false);
        ui.render_catalog(&CatalogView::Grid(Vec::new()));
        assert_eq!(output(ui), "No products\n");
    }

    #[test]
    fn test_blank_form_not_printed() {
        let mut ui = TerminalUi::new(Vec::new(), false);
        ui.show_form(&ProductForm::default());
        assert!(output(ui).is_empty());
    }

    #[test]
    fn test_edit_form_shows_heading_and_remote_preview() {
        let mut form = ProductForm::default();
        let mut product = products().remove(0);
        product.image_url = Some("http://img/1.png".to_string());
        form.populate(&product);

        let mut ui = TerminalUi::new(Vec::new(), false);
        ui.show_form(&form);
        let text = output(ui);

        assert!(text.starts_with("Edit Product\n"));
        assert!(text.contains("id:       1"));
        assert!(text.contains("preview:  http://img/1.png"));
    }

    #[test]
    fn test_local_preview_summary() {
        let preview = ImagePreview::Local("data:image/png;base64,AAAA".to_string());
        assert_eq!(
            describe_preview(&preview),
            "local image/png, 4 base64 chars, max width 200px"
        );
    }

    #[test]
    fn test_assume_yes_confirms_without_prompt() {
        let mut ui = TerminalUi::new(Vec::new(), true);
        assert!(ui.confirm("Delete?"));
        assert!(output(ui).is_empty());
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
    }
}
