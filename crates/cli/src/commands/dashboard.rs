//! Dashboard summary: collection totals and flyer status counts.

use flyercraft_client::api::ApiClient;
use flyercraft_client::sync::{FlyerCollection, ProductCollection};
use flyercraft_core::FlyerStatus;

use super::CliError;

pub async fn show(api: ApiClient) -> Result<(), CliError> {
    let mut products = ProductCollection::new(api.clone());
    let mut flyers = FlyerCollection::new(api);

    products.list().await?;
    flyers.list().await?;

    let published = flyers
        .items()
        .iter()
        .filter(|f| f.status == FlyerStatus::Published)
        .count();
    let drafts = flyers.items().len() - published;

    println!("Flyers:    {}", flyers.items().len());
    println!("Published: {published}");
    println!("Drafts:    {drafts}");
    println!("Products:  {}", products.items().len());
    Ok(())
}
