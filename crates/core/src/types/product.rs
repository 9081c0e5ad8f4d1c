//! Catalog product as reported by the backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Price, ProductId, ProductStatus};

/// A product in the catalog.
///
/// Field names on the wire are the backend's (`nome`, `preco`, ...). The
/// client only ever holds transient copies fetched per render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nome")]
    pub name: String,
    /// Unit price; accepts JSON numbers and numeric strings.
    #[serde(rename = "preco")]
    pub price: Decimal,
    /// Units in stock.
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    /// Missing or unrecognized codes read as inactive.
    #[serde(default = "missing_status")]
    pub status: ProductStatus,
    /// Image URL, if one was uploaded.
    #[serde(
        rename = "imagem",
        default,
        deserialize_with = "deserialize_image_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl Product {
    /// Price in the local currency.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::local(self.price)
    }

    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

const fn missing_status() -> ProductStatus {
    ProductStatus::Inactive
}

/// Treat `null` and blank strings as "no image".
fn deserialize_image_url<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|url| !url.trim().is_empty()))
}
