//! `reqwest` implementation of [`CatalogApi`].

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use catalog_panel_core::{Product, ProductId};

use super::{AccountStatus, ApiError, CatalogApi, ProductPayload};

/// HTTP client for the catalog backend.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &Url) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("catalog-panel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &Url) -> Self {
        // Ensure relative joins append to the base path instead of replacing
        // its last segment.
        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self { client, base_url }
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidRequest(format!("bad path '{path}': {e}")))
    }

    fn product_url(&self, id: ProductId) -> Result<Url, ApiError> {
        self.url(&format!("produto/{id}"))
    }

    /// Attach the bearer token and send.
    async fn send(
        request: RequestBuilder,
        token: &SecretString,
    ) -> Result<Response, ApiError> {
        let response = request.bearer_auth(token.expose_secret()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        request: RequestBuilder,
        token: &SecretString,
    ) -> Result<T, ApiError> {
        Self::send(request, token)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Build the multipart form for a create or update.
    fn product_form(payload: &ProductPayload) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, value) in payload.text_fields() {
            form = form.text(name, value.to_owned());
        }

        if let Some(image) = &payload.image {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.mime_type)
                .map_err(|e| {
                    ApiError::InvalidRequest(format!(
                        "invalid image type '{}': {e}",
                        image.mime_type
                    ))
                })?;
            form = form.part("imagem", part);
        }

        Ok(form)
    }
}

impl CatalogApi for CatalogClient {
    #[instrument(skip(self, token))]
    async fn me(&self, token: &SecretString) -> Result<AccountStatus, ApiError> {
        let request = self.client.get(self.url("me")?);
        Self::send_json(request, token).await
    }

    #[instrument(skip(self, token))]
    async fn list_products(&self, token: &SecretString) -> Result<Vec<Product>, ApiError> {
        let request = self.client.get(self.url("produto")?);
        Self::send_json(request, token).await
    }

    #[instrument(skip(self, token))]
    async fn get_product(
        &self,
        token: &SecretString,
        id: ProductId,
    ) -> Result<Product, ApiError> {
        let request = self.client.get(self.product_url(id)?);
        Self::send_json(request, token).await
    }

    #[instrument(skip(self, token, payload))]
    async fn create_product(
        &self,
        token: &SecretString,
        payload: &ProductPayload,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url("produto")?)
            .multipart(Self::product_form(payload)?);
        Self::send(request, token).await?;
        Ok(())
    }

    #[instrument(skip(self, token, payload))]
    async fn update_product(
        &self,
        token: &SecretString,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.product_url(id)?)
            .multipart(Self::product_form(payload)?);
        Self::send(request, token).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn delete_product(&self, token: &SecretString, id: ProductId) -> Result<(), ApiError> {
        let request = self.client.delete(self.product_url(id)?);
        Self::send(request, token).await?;
        Ok(())
    }
}
