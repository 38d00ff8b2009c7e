//! Flyer entity, its style descriptor and form draft.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{FlyerId, ProductId};

/// Visual template a flyer renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlyerTemplate {
    #[default]
    Template1,
    Template2,
    Template3,
    Template4,
}

/// How products are arranged on the flyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlyerLayout {
    #[default]
    Grid,
    List,
    Cards,
}

impl core::str::FromStr for FlyerTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "template1" => Ok(Self::Template1),
            "template2" => Ok(Self::Template2),
            "template3" => Ok(Self::Template3),
            "template4" => Ok(Self::Template4),
            other => Err(format!(
                "unknown template: {other} (expected template1..template4)"
            )),
        }
    }
}

impl core::str::FromStr for FlyerLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            "cards" => Ok(Self::Cards),
            other => Err(format!("unknown layout: {other} (expected grid, list or cards)")),
        }
    }
}

/// Publication state of a flyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlyerStatus {
    #[default]
    Draft,
    Published,
}

/// Primary/secondary color pair for a flyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlyerColors {
    pub primary: String,
    pub secondary: String,
}

impl Default for FlyerColors {
    fn default() -> Self {
        Self {
            primary: "#007bff".to_owned(),
            secondary: "#28a745".to_owned(),
        }
    }
}

/// Title/body font pair for a flyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlyerFonts {
    pub title: String,
    pub body: String,
}

impl Default for FlyerFonts {
    fn default() -> Self {
        Self {
            title: "Arial".to_owned(),
            body: "Arial".to_owned(),
        }
    }
}

/// A product embedded in a flyer: the reference plus the display fields the
/// backend denormalizes at save time. The backend remains authoritative for
/// whether the referenced product still exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyerProductRef {
    pub product_id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

/// A flyer owned by the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flyer {
    /// Backend-issued document ID.
    #[serde(rename = "_id", alias = "id")]
    pub id: FlyerId,
    /// Flyer headline.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub template: FlyerTemplate,
    #[serde(default)]
    pub layout: FlyerLayout,
    #[serde(default)]
    pub colors: FlyerColors,
    #[serde(default)]
    pub fonts: FlyerFonts,
    /// Embedded product references with denormalized display fields.
    #[serde(default)]
    pub products: Vec<FlyerProductRef>,
    #[serde(default)]
    pub status: FlyerStatus,
    /// Creation timestamp, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating or updating a flyer.
///
/// `products` carries the selected product IDs; the backend resolves and
/// denormalizes them into [`FlyerProductRef`]s on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FlyerDraft {
    pub title: String,
    pub description: String,
    pub template: FlyerTemplate,
    pub layout: FlyerLayout,
    pub colors: FlyerColors,
    pub fonts: FlyerFonts,
    pub products: Vec<ProductId>,
}

impl From<&Flyer> for FlyerDraft {
    fn from(flyer: &Flyer) -> Self {
        Self {
            title: flyer.title.clone(),
            description: flyer.description.clone(),
            template: flyer.template,
            layout: flyer.layout,
            colors: flyer.colors.clone(),
            fonts: flyer.fonts.clone(),
            products: flyer.products.iter().map(|p| p.product_id.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_defaults_match_the_create_form() {
        let draft = FlyerDraft::default();
        assert_eq!(draft.template, FlyerTemplate::Template1);
        assert_eq!(draft.layout, FlyerLayout::Grid);
        assert_eq!(draft.colors.primary, "#007bff");
        assert_eq!(draft.fonts.body, "Arial");
        assert!(draft.products.is_empty());
    }

    #[test]
    fn deserializes_minimal_backend_record() {
        let flyer: Flyer = serde_json::from_str(r#"{"_id":"f1","title":"Sale"}"#)
            .expect("deserialize");
        assert_eq!(flyer.template, FlyerTemplate::Template1);
        assert_eq!(flyer.status, FlyerStatus::Draft);
        assert!(flyer.products.is_empty());
    }

    #[test]
    fn draft_seeding_keeps_product_ids_only() {
        let flyer: Flyer = serde_json::from_str(
            r#"{
                "_id": "f1",
                "title": "Sale",
                "template": "template2",
                "layout": "cards",
                "products": [
                    {"productId": "p1", "name": "Widget", "price": "9.99"},
                    {"productId": "p2", "name": "Gadget"}
                ]
            }"#,
        )
        .expect("deserialize");

        let draft = FlyerDraft::from(&flyer);
        assert_eq!(draft.template, FlyerTemplate::Template2);
        assert_eq!(
            draft.products,
            vec![ProductId::new("p1"), ProductId::new("p2")]
        );
    }
}
