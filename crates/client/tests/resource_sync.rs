//! Resource sync controllers against a mock backend: refetch-after-mutate,
//! no partial mutation, confirmed deletes and flyer duplication.

mod common;

use serde_json::json;

use flyercraft_client::{Confirmation, FlyerCollection, ProductCollection, RemoveOutcome};
use flyercraft_core::{FlyerId, ProductId};

use common::api_for;

fn product_json(id: &str, name: &str, price: &str) -> serde_json::Value {
    json!({"_id": id, "name": name, "price": price})
}

fn flyer_json(id: &str, title: &str) -> serde_json::Value {
    json!({"_id": id, "title": title})
}

#[tokio::test]
async fn list_replaces_the_collection() {
    let mut server = mockito::Server::new_async().await;
    let list = server
        .mock("GET", "/api/products")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([product_json("p1", "Widget", "9.99"), product_json("p2", "Gadget", "4.50")])
                .to_string(),
        )
        .create_async()
        .await;

    let (api, _store) = api_for(&server);
    let mut products = ProductCollection::new(api);

    let items = products.list().await.expect("list ok");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Widget");
    list.assert_async().await;
}

#[tokio::test]
async fn list_accepts_a_data_envelope() {
    let mut server = mockito::Server::new_async().await;
    let list = server
        .mock("GET", "/api/flyers")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"data": [flyer_json("f1", "Sale")]}).to_string())
        .create_async()
        .await;

    let (api, _store) = api_for(&server);
    let mut flyers = FlyerCollection::new(api);

    let items = flyers.list().await.expect("list ok");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Sale");
    list.assert_async().await;
}

#[tokio::test]
async fn create_posts_then_refetches_the_authoritative_list() {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/api/products")
        .match_body(mockito::Matcher::PartialJson(json!({
            "name": "Widget",
            "price": "9.99",
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({"product": product_json("p1", "Widget", "9.99")}).to_string())
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/products")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([product_json("p1", "Widget", "9.99")]).to_string())
        .create_async()
        .await;

    let (api, _store) = api_for(&server);
    let mut products = ProductCollection::new(api);
    assert!(products.items().is_empty());

    let draft = flyercraft_core::ProductDraft {
        name: "Widget".to_owned(),
        price: "9.99".parse().expect("decimal"),
        ..Default::default()
    };
    products.create(&draft).await.expect("create ok");

    // The collection grew by exactly one, straight from the list response.
    assert_eq!(products.items().len(), 1);
    assert_eq!(products.items()[0].name, "Widget");
    create.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn failing_create_leaves_the_collection_untouched() {
    let mut server = mockito::Server::new_async().await;
    let seed = server
        .mock("GET", "/api/products")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([product_json("p1", "Widget", "9.99")]).to_string())
        .expect(1)
        .create_async()
        .await;

    let (api, _store) = api_for(&server);
    let mut products = ProductCollection::new(api);
    products.list().await.expect("seed list ok");
    let before = products.items().to_vec();

    let create = server
        .mock("POST", "/api/products")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Name is required"}"#)
        .create_async()
        .await;

    let err = products
        .create(&flyercraft_core::ProductDraft::default())
        .await
        .expect_err("create must fail");

    assert_eq!(err.message(), "Name is required");
    assert_eq!(products.items(), before.as_slice());
    create.assert_async().await;
    seed.assert_async().await;
}

#[tokio::test]
async fn update_puts_to_the_entity_path_then_refetches() {
    let mut server = mockito::Server::new_async().await;
    let update = server
        .mock("PUT", "/api/products/p1")
        .match_body(mockito::Matcher::PartialJson(json!({"name": "Widget XL"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"product": product_json("p1", "Widget XL", "9.99")}).to_string())
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/products")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([product_json("p1", "Widget XL", "9.99")]).to_string())
        .create_async()
        .await;

    let (api, _store) = api_for(&server);
    let mut products = ProductCollection::new(api);

    let draft = flyercraft_core::ProductDraft {
        name: "Widget XL".to_owned(),
        price: "9.99".parse().expect("decimal"),
        ..Default::default()
    };
    products
        .update(&ProductId::new("p1"), &draft)
        .await
        .expect("update ok");

    assert_eq!(products.items()[0].name, "Widget XL");
    update.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn remove_without_confirmation_never_calls_the_backend() {
    let mut server = mockito::Server::new_async().await;
    let delete = server
        .mock("DELETE", "/api/products/p1")
        .expect(0)
        .create_async()
        .await;

    let (api, _store) = api_for(&server);
    let mut products = ProductCollection::new(api);

    let outcome = products
        .remove(&ProductId::new("p1"), Confirmation::Cancelled)
        .await
        .expect("cancelled remove is not an error");

    assert_eq!(outcome, RemoveOutcome::Cancelled);
    delete.assert_async().await;
}

#[tokio::test]
async fn confirmed_remove_deletes_then_refetches() {
    let mut server = mockito::Server::new_async().await;
    let seed = server
        .mock("GET", "/api/products")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([product_json("p1", "Widget", "9.99"), product_json("p2", "Gadget", "4.50")])
                .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let (api, _store) = api_for(&server);
    let mut products = ProductCollection::new(api);
    products.list().await.expect("seed list ok");
    seed.assert_async().await;

    let delete = server
        .mock("DELETE", "/api/products/p1")
        .with_status(200)
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/products")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([product_json("p2", "Gadget", "4.50")]).to_string())
        .create_async()
        .await;

    let outcome = products
        .remove(&ProductId::new("p1"), Confirmation::Confirmed)
        .await
        .expect("remove ok");

    assert_eq!(outcome, RemoveOutcome::Removed);
    assert!(products
        .items()
        .iter()
        .all(|p| p.id != ProductId::new("p1")));
    delete.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn failing_delete_keeps_the_entity() {
    let mut server = mockito::Server::new_async().await;
    let seed = server
        .mock("GET", "/api/products")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([product_json("p1", "Widget", "9.99")]).to_string())
        .expect(1)
        .create_async()
        .await;

    let (api, _store) = api_for(&server);
    let mut products = ProductCollection::new(api);
    products.list().await.expect("seed list ok");
    seed.assert_async().await;

    let delete = server
        .mock("DELETE", "/api/products/p1")
        .with_status(500)
        .create_async()
        .await;

    let err = products
        .remove(&ProductId::new("p1"), Confirmation::Confirmed)
        .await
        .expect_err("remove must fail");

    assert_eq!(err.message(), "Failed to delete product");
    assert_eq!(products.items().len(), 1);
    delete.assert_async().await;
}

#[tokio::test]
async fn duplicate_posts_an_empty_body_then_refetches() {
    let mut server = mockito::Server::new_async().await;
    let duplicate = server
        .mock("POST", "/api/flyers/f1/duplicate")
        .match_body(mockito::Matcher::Json(json!({})))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(flyer_json("f2", "Sale").to_string())
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/flyers")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([flyer_json("f1", "Sale"), flyer_json("f2", "Sale")]).to_string())
        .create_async()
        .await;

    let (api, _store) = api_for(&server);
    let mut flyers = FlyerCollection::new(api);

    flyers.duplicate(&FlyerId::new("f1")).await.expect("duplicate ok");

    assert_eq!(flyers.items().len(), 2);
    duplicate.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn flyer_save_carries_selected_product_ids() {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/api/flyers")
        .match_body(mockito::Matcher::PartialJson(json!({
            "title": "Summer Sale",
            "template": "template2",
            "products": ["p1", "p2"],
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(flyer_json("f1", "Summer Sale").to_string())
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/flyers")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([flyer_json("f1", "Summer Sale")]).to_string())
        .create_async()
        .await;

    let (api, _store) = api_for(&server);
    let mut flyers = FlyerCollection::new(api);

    let draft = flyercraft_core::FlyerDraft {
        title: "Summer Sale".to_owned(),
        template: flyercraft_core::FlyerTemplate::Template2,
        products: vec![ProductId::new("p1"), ProductId::new("p2")],
        ..Default::default()
    };
    flyers.create(&draft).await.expect("create ok");

    assert_eq!(flyers.items().len(), 1);
    create.assert_async().await;
    list.assert_async().await;
}
