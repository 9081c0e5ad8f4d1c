//! Catalog backend REST API.
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | Current user status | GET | `/me` |
//! | List products | GET | `/produto` |
//! | Get one product | GET | `/produto/{id}` |
//! | Create product | POST | `/produto` (multipart) |
//! | Update product | PUT | `/produto/{id}` (multipart) |
//! | Delete product | DELETE | `/produto/{id}` |
//!
//! Every call carries the session token as a bearer credential. Calls are
//! made once; there are no retries or timeouts.
//!
//! [`CatalogApi`] is the seam the rest of the crate talks to, so access and
//! catalog logic can be exercised against a fake backend.

mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::{AccountStatus, ImageUpload, ProductPayload};

use std::future::Future;

use secrecy::SecretString;
use thiserror::Error;

use catalog_panel_core::{Product, ProductId};

/// Errors that can occur when talking to the catalog backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection refused, DNS, body read, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request could not be built from the given input.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status of a rejected request, if the backend answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Operations the panel needs from the catalog backend.
pub trait CatalogApi {
    /// Fetch the status of the account that owns `token`.
    fn me(
        &self,
        token: &SecretString,
    ) -> impl Future<Output = Result<AccountStatus, ApiError>> + Send;

    /// Fetch every product.
    fn list_products(
        &self,
        token: &SecretString,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Fetch a single product.
    fn get_product(
        &self,
        token: &SecretString,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// Create a product.
    fn create_product(
        &self,
        token: &SecretString,
        payload: &ProductPayload,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Replace the fields of an existing product.
    fn update_product(
        &self,
        token: &SecretString,
        id: ProductId,
        payload: &ProductPayload,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Delete a product.
    fn delete_product(
        &self,
        token: &SecretString,
        id: ProductId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
