//! Product commands.

use rust_decimal::Decimal;

use flyercraft_client::api::ApiClient;
use flyercraft_client::sync::{Confirmation, ProductCollection, RemoveOutcome};
use flyercraft_core::{ProductDraft, ProductId};

use super::{CliError, confirm};

/// Optional field overrides from the command line.
pub struct ProductFields {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub barcode: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

impl ProductFields {
    fn apply(self, draft: &mut ProductDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(barcode) = self.barcode {
            draft.barcode = barcode;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(image_url) = self.image_url {
            draft.image_url = image_url;
        }
    }
}

pub async fn list(api: ApiClient) -> Result<(), CliError> {
    let mut products = ProductCollection::new(api);
    let items = products.list().await?;

    if items.is_empty() {
        println!("No products yet");
        return Ok(());
    }
    for product in items {
        println!(
            "{}  {}  {}  {}",
            product.id, product.name, product.price, product.category
        );
    }
    Ok(())
}

pub async fn create(api: ApiClient, fields: ProductFields) -> Result<(), CliError> {
    let mut products = ProductCollection::new(api);

    let mut draft = ProductDraft::default();
    fields.apply(&mut draft);

    products.create(&draft).await?;
    println!("Product created ({} total)", products.items().len());
    Ok(())
}

/// Update a product. The draft is seeded from the server's current record,
/// so unset fields keep their value and omitted server fields become
/// empty rather than absent.
pub async fn update(api: ApiClient, id: &str, fields: ProductFields) -> Result<(), CliError> {
    let mut products = ProductCollection::new(api);
    products.list().await?;

    let product_id = ProductId::new(id);
    let existing = products
        .items()
        .iter()
        .find(|p| p.id == product_id)
        .ok_or_else(|| CliError::NotFound {
            kind: "product",
            id: id.to_owned(),
        })?;

    let mut draft = ProductDraft::from(existing);
    fields.apply(&mut draft);

    products.update(&product_id, &draft).await?;
    println!("Product {product_id} updated");
    Ok(())
}

pub async fn delete(api: ApiClient, id: &str, yes: bool) -> Result<(), CliError> {
    let confirmation = if yes {
        Confirmation::Confirmed
    } else {
        confirm(&format!("Delete product {id}?"))?
    };

    let mut products = ProductCollection::new(api);
    match products.remove(&ProductId::new(id), confirmation).await? {
        RemoveOutcome::Removed => println!("Product {id} deleted"),
        RemoveOutcome::Cancelled => println!("Cancelled"),
    }
    Ok(())
}
