//! Flyer commands.

use flyercraft_client::api::ApiClient;
use flyercraft_client::sync::{Confirmation, FlyerCollection, RemoveOutcome};
use flyercraft_core::{FlyerDraft, FlyerId, FlyerLayout, FlyerTemplate, ProductId};

use super::{CliError, confirm};

/// Optional field overrides from the command line.
pub struct FlyerFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub template: Option<FlyerTemplate>,
    pub layout: Option<FlyerLayout>,
    pub products: Vec<String>,
}

impl FlyerFields {
    fn apply(self, draft: &mut FlyerDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(template) = self.template {
            draft.template = template;
        }
        if let Some(layout) = self.layout {
            draft.layout = layout;
        }
        if !self.products.is_empty() {
            draft.products = self.products.into_iter().map(ProductId::new).collect();
        }
    }
}

pub async fn list(api: ApiClient) -> Result<(), CliError> {
    let mut flyers = FlyerCollection::new(api);
    let items = flyers.list().await?;

    if items.is_empty() {
        println!("No flyers yet");
        return Ok(());
    }
    for flyer in items {
        println!(
            "{}  {}  {:?}/{:?}  {} products  {:?}",
            flyer.id,
            flyer.title,
            flyer.template,
            flyer.layout,
            flyer.products.len(),
            flyer.status,
        );
    }
    Ok(())
}

pub async fn create(api: ApiClient, fields: FlyerFields) -> Result<(), CliError> {
    let mut flyers = FlyerCollection::new(api);

    let mut draft = FlyerDraft::default();
    fields.apply(&mut draft);

    flyers.create(&draft).await?;
    println!("Flyer created ({} total)", flyers.items().len());
    Ok(())
}

/// Update a flyer. The draft is seeded from the server's current record;
/// the product selection is replaced only when `--product` is given.
pub async fn update(api: ApiClient, id: &str, fields: FlyerFields) -> Result<(), CliError> {
    let mut flyers = FlyerCollection::new(api);
    flyers.list().await?;

    let flyer_id = FlyerId::new(id);
    let existing = flyers
        .items()
        .iter()
        .find(|f| f.id == flyer_id)
        .ok_or_else(|| CliError::NotFound {
            kind: "flyer",
            id: id.to_owned(),
        })?;

    let mut draft = FlyerDraft::from(existing);
    fields.apply(&mut draft);

    flyers.update(&flyer_id, &draft).await?;
    println!("Flyer {flyer_id} updated");
    Ok(())
}

pub async fn delete(api: ApiClient, id: &str, yes: bool) -> Result<(), CliError> {
    let confirmation = if yes {
        Confirmation::Confirmed
    } else {
        confirm(&format!("Delete flyer {id}?"))?
    };

    let mut flyers = FlyerCollection::new(api);
    match flyers.remove(&FlyerId::new(id), confirmation).await? {
        RemoveOutcome::Removed => println!("Flyer {id} deleted"),
        RemoveOutcome::Cancelled => println!("Cancelled"),
    }
    Ok(())
}

pub async fn duplicate(api: ApiClient, id: &str) -> Result<(), CliError> {
    let mut flyers = FlyerCollection::new(api);
    flyers.duplicate(&FlyerId::new(id)).await?;
    println!("Flyer {id} duplicated ({} total)", flyers.items().len());
    Ok(())
}
