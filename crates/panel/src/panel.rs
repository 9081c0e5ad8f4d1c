//! The panel application instance.
//!
//! [`Panel`] owns the session, cart, product form and backend client for one
//! running panel and exposes the user-facing operations. Each operation is a
//! single request/response cycle: failures are reported through the UI
//! (alert or login redirect), logged, and returned; nothing is retried and no
//! local state needs rolling back.

use std::path::Path;
use std::sync::Arc;

use secrecy::SecretString;
use tracing::instrument;

use catalog_panel_core::ProductId;

use crate::api::{CatalogApi, CatalogClient, ImageUpload};
use crate::cart::CartManager;
use crate::catalog::{Catalog, CatalogView, ProductForm, SubmitOutcome};
use crate::config::PanelConfig;
use crate::error::{PanelError, Result, add_breadcrumb, report};
use crate::gate::{AccessGate, GateError, PanelView};
use crate::session::SessionManager;
use crate::storage::{FileStore, Storage};
use crate::ui::PanelUi;

/// User-facing messages.
pub mod messages {
    pub const PRODUCT_CREATED: &str = "Product created successfully!";
    pub const PRODUCT_UPDATED: &str = "Product updated successfully!";
    pub const SAVE_FAILED: &str = "Error saving product!";
    pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this product?";
    pub const PRODUCT_DELETED: &str = "Product deleted successfully!";
    pub const DELETE_FAILED: &str = "Error deleting product!";
    pub const ADDED_TO_CART: &str = "Product added to cart!";
}

/// One running panel.
pub struct Panel<A, U> {
    api: A,
    ui: U,
    session: SessionManager,
    cart: CartManager,
    form: ProductForm,
    fallback_image_url: String,
}

impl<U: PanelUi> Panel<CatalogClient, U> {
    /// Build a panel backed by the HTTP client and on-disk stores described
    /// by `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn from_config(config: &PanelConfig, ui: U) -> Result<Self> {
        let api = CatalogClient::new(&config.api_url)?;
        let storage = Storage::new(
            Arc::new(FileStore::in_dir(&config.session_dir)),
            Arc::new(FileStore::in_dir(&config.data_dir)),
        );

        Ok(Self::new(api, ui, storage, config.fallback_image_url.clone()))
    }
}

impl<A: CatalogApi, U: PanelUi> Panel<A, U> {
    /// Create a panel from its parts.
    #[must_use]
    pub fn new(api: A, ui: U, storage: Storage, fallback_image_url: String) -> Self {
        Self {
            api,
            ui,
            session: SessionManager::new(storage.clone()),
            cart: CartManager::new(storage),
            form: ProductForm::default(),
            fallback_image_url,
        }
    }

    /// Session manager.
    #[must_use]
    pub const fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Cart manager.
    #[must_use]
    pub const fn cart(&self) -> &CartManager {
        &self.cart
    }

    /// UI adapter.
    #[must_use]
    pub const fn ui(&self) -> &U {
        &self.ui
    }

    /// Current product form.
    #[must_use]
    pub const fn form(&self) -> &ProductForm {
        &self.form
    }

    /// Product form for the UI to write field input into.
    pub const fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    /// Page-load sequence: cart count, access check, then the catalog.
    ///
    /// # Errors
    ///
    /// Returns error if the cart count cannot be read or the access check
    /// fails. A failed catalog load is only logged.
    pub async fn start(&mut self) -> Result<PanelView> {
        self.update_cart_count()?;
        let view = self.check_admin_status().await?;
        if let Err(err) = self.load_products().await {
            tracing::debug!(error = %err, "Initial catalog load failed");
        }
        Ok(view)
    }

    /// Validate the session and show the matching view, or go to login.
    ///
    /// # Errors
    ///
    /// Returns `PanelError::Gate` after navigating to the login view.
    pub async fn check_admin_status(&mut self) -> Result<PanelView> {
        let result = AccessGate::new(&self.api, &self.session)
            .check_admin_status()
            .await;

        match result {
            Ok(view) => {
                self.ui.show_view(view);
                Ok(view)
            }
            Err(err) => {
                let err = PanelError::from(err);
                report(&err, "check_admin_status");
                self.ui.navigate_to_login();
                Err(err)
            }
        }
    }

    /// Clear the session and go to login.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be written.
    pub fn logout(&mut self) -> Result<()> {
        add_breadcrumb("auth", "Logout", None);
        self.session.clear_token()?;
        self.ui.navigate_to_login();
        Ok(())
    }

    /// Fetch products and render them for the cached role.
    ///
    /// Failures are logged only; the UI is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the logged failure.
    #[instrument(skip(self))]
    pub async fn load_products(&mut self) -> Result<CatalogView> {
        let result = self.fetch_catalog().await;
        match result {
            Ok(view) => {
                self.ui.render_catalog(&view);
                Ok(view)
            }
            Err(err) => {
                report(&err, "load_products");
                Err(err)
            }
        }
    }

    async fn fetch_catalog(&self) -> Result<CatalogView> {
        let token = self.bearer_token()?;
        let role = self.session.cached_role()?;
        let view = Catalog::new(&self.api, &self.fallback_image_url)
            .load_products(&token, role)
            .await?;
        Ok(view)
    }

    /// Add one unit of `id` to the cart, refresh the count and confirm.
    ///
    /// # Errors
    ///
    /// Returns error if the cart cannot be read or written.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<u32> {
        add_breadcrumb("cart", "Add to cart", Some(&[("product_id", id.to_string().as_str())]));
        self.cart.add_to_cart(id)?;
        let count = self.update_cart_count()?;
        self.ui.alert(messages::ADDED_TO_CART);
        Ok(count)
    }

    /// Recompute the cart total and push it to the UI.
    ///
    /// # Errors
    ///
    /// Returns error if the cart cannot be read.
    pub fn update_cart_count(&mut self) -> Result<u32> {
        let count = self.cart.count()?;
        self.ui.set_cart_count(count);
        Ok(count)
    }

    /// Choose an image file for the form, or clear the choice with `None`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read; the form is left unchanged.
    pub fn select_image(&mut self, path: Option<&Path>) -> Result<()> {
        let image = path.map(ImageUpload::from_path).transpose()?;
        self.form.select_image(image);
        self.ui.show_form(&self.form);
        Ok(())
    }

    /// Submit the product form as a create or update.
    ///
    /// On success the form is reset and the catalog reloaded. On failure a
    /// generic error is shown and the form is kept.
    ///
    /// # Errors
    ///
    /// Returns the failure after alerting.
    #[instrument(skip(self), fields(mode = ?self.form.mode()))]
    pub async fn submit_product_form(&mut self) -> Result<SubmitOutcome> {
        add_breadcrumb("catalog", "Submit product form", None);

        let result = self.save_form().await;
        match result {
            Ok(outcome) => {
                self.ui.alert(match outcome {
                    SubmitOutcome::Created => messages::PRODUCT_CREATED,
                    SubmitOutcome::Updated(_) => messages::PRODUCT_UPDATED,
                });
                self.form.reset();
                self.ui.show_form(&self.form);
                if let Err(err) = self.load_products().await {
                    tracing::debug!(error = %err, "Catalog reload after save failed");
                }
                Ok(outcome)
            }
            Err(err) => {
                report(&err, "submit_product_form");
                self.ui.alert(messages::SAVE_FAILED);
                Err(err)
            }
        }
    }

    async fn save_form(&self) -> Result<SubmitOutcome> {
        let token = self.bearer_token()?;
        let outcome = Catalog::new(&self.api, &self.fallback_image_url)
            .submit(&token, &self.form)
            .await?;
        Ok(outcome)
    }

    /// Load a product into the form for editing.
    ///
    /// Failures are logged only.
    ///
    /// # Errors
    ///
    /// Returns the logged failure.
    #[instrument(skip(self))]
    pub async fn edit_product(&mut self, id: ProductId) -> Result<()> {
        let result = self.fetch_product(id).await;
        match result {
            Ok(product) => {
                self.form.populate(&product);
                self.ui.show_form(&self.form);
                Ok(())
            }
            Err(err) => {
                report(&err, "edit_product");
                Err(err)
            }
        }
    }

    async fn fetch_product(&self, id: ProductId) -> Result<catalog_panel_core::Product> {
        let token = self.bearer_token()?;
        let product = Catalog::new(&self.api, &self.fallback_image_url)
            .fetch(&token, id)
            .await?;
        Ok(product)
    }

    /// Abandon the current edit and return the form to create mode.
    pub fn cancel_edit(&mut self) {
        self.form.reset();
        self.ui.show_form(&self.form);
    }

    /// Delete a product after the user confirms.
    ///
    /// Returns `false` when the user declines.
    ///
    /// # Errors
    ///
    /// Returns the failure after alerting.
    #[instrument(skip(self))]
    pub async fn delete_product(&mut self, id: ProductId) -> Result<bool> {
        if !self.ui.confirm(messages::CONFIRM_DELETE) {
            return Ok(false);
        }

        add_breadcrumb("catalog", "Delete product", Some(&[("product_id", id.to_string().as_str())]));

        let result = self.remove_product(id).await;
        match result {
            Ok(()) => {
                self.ui.alert(messages::PRODUCT_DELETED);
                if let Err(err) = self.load_products().await {
                    tracing::debug!(error = %err, "Catalog reload after delete failed");
                }
                Ok(true)
            }
            Err(err) => {
                report(&err, "delete_product");
                self.ui.alert(messages::DELETE_FAILED);
                Err(err)
            }
        }
    }

    async fn remove_product(&self, id: ProductId) -> Result<()> {
        let token = self.bearer_token()?;
        Catalog::new(&self.api, &self.fallback_image_url)
            .delete(&token, id)
            .await?;
        Ok(())
    }

    /// Token for an authenticated call.
    fn bearer_token(&self) -> Result<SecretString> {
        self.session
            .get_token()?
            .ok_or(PanelError::Gate(GateError::LoginRequired))
    }
}

impl<A, U> std::fmt::Debug for Panel<A, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}
