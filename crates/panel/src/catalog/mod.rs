//! Catalog rendering and product management.
//!
//! - [`view`] - pure product-to-view-model functions
//! - [`form`] - create/update form state
//! - [`preview`] - local image selection and thumbnail
//!
//! [`Catalog`] performs the network half of each operation; the panel wraps
//! it with alerts and re-rendering.

pub mod form;
pub mod preview;
pub mod view;

pub use form::{FormMode, ProductForm};
pub use preview::{ImagePreview, PreviewError};
pub use view::{
    AdminProductRow, CartButton, CatalogView, ProductCard, render_admin_products,
    render_for_role, render_user_products,
};

use secrecy::SecretString;
use tracing::instrument;

use catalog_panel_core::{Product, ProductId, Role};

use crate::api::{ApiError, CatalogApi};

/// Outcome of a successful form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated(ProductId),
}

/// Catalog operations against the backend.
#[derive(Debug)]
pub struct Catalog<'a, A> {
    api: &'a A,
    fallback_image_url: &'a str,
}

impl<'a, A: CatalogApi> Catalog<'a, A> {
    /// Create a catalog over `api`.
    #[must_use]
    pub const fn new(api: &'a A, fallback_image_url: &'a str) -> Self {
        Self {
            api,
            fallback_image_url,
        }
    }

    /// Fetch all products and render them for `role`.
    ///
    /// # Errors
    ///
    /// Returns error if the request or response parsing fails.
    #[instrument(skip(self, token))]
    pub async fn load_products(
        &self,
        token: &SecretString,
        role: Option<Role>,
    ) -> Result<CatalogView, ApiError> {
        let products = self.api.list_products(token).await?;
        tracing::debug!(count = products.len(), "Products loaded");
        Ok(render_for_role(role, &products, self.fallback_image_url))
    }

    /// Submit `form` as a create or an update depending on its mode.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip(self, token, form), fields(mode = ?form.mode()))]
    pub async fn submit(
        &self,
        token: &SecretString,
        form: &ProductForm,
    ) -> Result<SubmitOutcome, ApiError> {
        let payload = form.to_payload();
        match form.mode() {
            FormMode::Create => {
                self.api.create_product(token, &payload).await?;
                tracing::info!(name = %payload.name, "Product created");
                Ok(SubmitOutcome::Created)
            }
            FormMode::Update(id) => {
                self.api.update_product(token, id, &payload).await?;
                tracing::info!(%id, "Product updated");
                Ok(SubmitOutcome::Updated(id))
            }
        }
    }

    /// Fetch one product for editing.
    ///
    /// # Errors
    ///
    /// Returns error if the request or response parsing fails.
    pub async fn fetch(&self, token: &SecretString, id: ProductId) -> Result<Product, ApiError> {
        self.api.get_product(token, id).await
    }

    /// Delete one product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip(self, token))]
    pub async fn delete(&self, token: &SecretString, id: ProductId) -> Result<(), ApiError> {
        self.api.delete_product(token, id).await?;
        tracing::info!(%id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, sample_products};

    fn token() -> SecretString {
        SecretString::from("tok".to_string())
    }

    #[tokio::test]
    async fn test_submit_without_id_creates() {
        let api = FakeApi::new();
        let form = ProductForm {
            name: "Caneca".to_string(),
            price: "19.90".to_string(),
            quantity: "2".to_string(),
            status: "1".to_string(),
            ..ProductForm::default()
        };

        let outcome = Catalog::new(&api, "fb").submit(&token(), &form).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Created);
        assert_eq!(api.calls(), vec!["POST /produto".to_string()]);
        assert_eq!(api.last_payload().unwrap().name, "Caneca");
    }

    #[tokio::test]
    async fn test_submit_with_id_updates() {
        let api = FakeApi::new();
        let form = ProductForm {
            editing_id: Some(ProductId::new(4)),
            ..ProductForm::default()
        };

        let outcome = Catalog::new(&api, "fb").submit(&token(), &form).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Updated(ProductId::new(4)));
        assert_eq!(api.calls(), vec!["PUT /produto/4".to_string()]);
    }

    #[tokio::test]
    async fn test_load_products_renders_for_role() {
        let api = FakeApi::new().with_products(sample_products());
        let catalog = Catalog::new(&api, "fb");

        let view = catalog.load_products(&token(), Some(Role::Admin)).await.unwrap();
        assert!(matches!(view, CatalogView::Management(ref rows) if rows.len() == 2));

        let view = catalog.load_products(&token(), None).await.unwrap();
        assert!(matches!(view, CatalogView::Grid(ref cards) if cards.len() == 2));
    }

    #[tokio::test]
    async fn test_delete_propagates_rejection() {
        let api = FakeApi::new().with_mutation_status(403);
        let err = Catalog::new(&api, "fb")
            .delete(&token(), ProductId::new(1))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(api.calls(), vec!["DELETE /produto/1".to_string()]);
    }
}
