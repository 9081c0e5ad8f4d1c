//! Request and response bodies for the catalog backend.

use serde::Deserialize;

use catalog_panel_core::Role;

/// Response of `GET /me`.
///
/// Only the status code matters to the panel; other fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AccountStatus {
    #[serde(default)]
    pub status: Role,
}

/// Multipart body for creating or updating a product.
///
/// Field values are sent exactly as entered; the backend validates them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductPayload {
    /// Sent as `nome`.
    pub name: String,
    /// Sent as `preco`.
    pub price: String,
    /// Sent as `quantidade`.
    pub quantity: String,
    /// Sent as `status`.
    pub status: String,
    /// Sent as the `imagem` file part when present.
    pub image: Option<ImageUpload>,
}

impl ProductPayload {
    /// Text fields in submission order, keyed by their wire names.
    #[must_use]
    pub fn text_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("nome", self.name.as_str()),
            ("preco", self.price.as_str()),
            ("quantidade", self.quantity.as_str()),
            ("status", self.status.as_str()),
        ]
    }
}

/// An image file chosen for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
