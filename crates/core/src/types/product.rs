//! Product entity and its form draft.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product owned by the current user.
///
/// Every field except `id`, `name` and `price` may be omitted by the
/// backend; those default to empty so downstream consumers never deal with
/// absent values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend-issued document ID.
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// EAN/UPC barcode, if any.
    #[serde(default)]
    pub barcode: String,
    /// Free-text category.
    #[serde(default)]
    pub category: String,
    /// Image URL for flyer rendering.
    #[serde(default)]
    pub image_url: String,
    /// Creation timestamp, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating or updating a product.
///
/// Seeding a draft from an existing product fills every field the backend
/// may have omitted with the empty value of its type, so an edit form never
/// starts from an absent value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub barcode: String,
    pub category: String,
    pub image_url: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            barcode: String::new(),
            category: String::new(),
            image_url: String::new(),
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            barcode: product.barcode.clone(),
            category: product.category.clone(),
            image_url: product.image_url.clone(),
        }
    }
}
