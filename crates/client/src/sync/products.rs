//! Product collection controller.

use flyercraft_core::{Product, ProductDraft, ProductId};

use super::{Resource, SyncedCollection};

impl Resource for Product {
    const ENDPOINT: &'static str = "/api/products";
    const KIND: &'static str = "product";

    type Id = ProductId;
    type Draft = ProductDraft;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Sync controller for the user's products.
pub type ProductCollection = SyncedCollection<Product>;
