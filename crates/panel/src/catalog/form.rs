//! Product create/update form state.

use catalog_panel_core::{Product, ProductId};

use super::preview::ImagePreview;
use crate::api::{ImageUpload, ProductPayload};

/// Form heading while creating a product.
pub const CREATE_HEADING: &str = "New Product";

/// Form heading while editing a product.
pub const EDIT_HEADING: &str = "Edit Product";

/// What submitting the form will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// `POST /produto`
    Create,
    /// `PUT /produto/{id}`
    Update(ProductId),
}

/// The product form.
///
/// Text fields hold whatever was entered and are submitted verbatim.
/// `editing_id` plays the role of the hidden id field: when set, submitting
/// updates that product instead of creating one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub editing_id: Option<ProductId>,
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub status: String,
    /// File chosen for upload.
    pub image: Option<ImageUpload>,
    /// Thumbnail of the chosen file or of the product's current image.
    pub preview: Option<ImagePreview>,
}

impl ProductForm {
    /// Create vs update, decided by the presence of an editing id.
    #[must_use]
    pub const fn mode(&self) -> FormMode {
        match self.editing_id {
            Some(id) => FormMode::Update(id),
            None => FormMode::Create,
        }
    }

    /// Heading for the current mode.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self.mode() {
            FormMode::Create => CREATE_HEADING,
            FormMode::Update(_) => EDIT_HEADING,
        }
    }

    /// Multipart body for submission.
    #[must_use]
    pub fn to_payload(&self) -> ProductPayload {
        ProductPayload {
            name: self.name.clone(),
            price: self.price.clone(),
            quantity: self.quantity.clone(),
            status: self.status.clone(),
            image: self.image.clone(),
        }
    }

    /// Fill the form from an existing product and switch to edit mode.
    pub fn populate(&mut self, product: &Product) {
        self.editing_id = Some(product.id);
        self.name.clone_from(&product.name);
        self.price = product.price.to_string();
        self.quantity = product.quantity.to_string();
        self.status = product.status.code().to_string();
        self.image = None;
        self.preview = product.image_url.clone().map(ImagePreview::Remote);
    }

    /// Choose (or with `None`, clear) the image to upload.
    pub fn select_image(&mut self, image: Option<ImageUpload>) {
        self.preview = image.as_ref().map(ImagePreview::from_upload);
        self.image = image;
    }

    /// Clear every field, the preview and the editing id.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
