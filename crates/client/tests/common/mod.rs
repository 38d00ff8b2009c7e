//! Shared helpers for the client integration tests.

// Each test binary compiles its own copy; not every binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use url::Url;

use flyercraft_client::{
    ApiClient, ClientConfig, CredentialStore, MemoryCredentialStore, SessionManager,
};
use flyercraft_core::{AuthToken, UserProfile};

/// Build a dispatcher pointed at the mock server, backed by an in-memory
/// credential store.
pub fn api_for(server: &mockito::ServerGuard) -> (ApiClient, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::new());
    let config = ClientConfig::new(
        Url::parse(&server.url()).expect("mock server url"),
        std::env::temp_dir(),
    );
    let api = ApiClient::new(&config, store.clone()).expect("client builds");
    (api, store)
}

/// A backend user record as JSON.
pub fn user_json(id: &str, first_name: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "firstName": first_name,
        "lastName": "Cohen",
        "email": "a@b.com",
    })
}

/// The same record as a typed profile.
pub fn user(id: &str, first_name: &str) -> UserProfile {
    serde_json::from_value(user_json(id, first_name)).expect("valid user")
}

/// Seed the store and rehydrate the session so subsequent calls carry
/// `Bearer <token>`. Mounts a one-shot profile mock for the verification
/// probe.
pub async fn sign_in(
    server: &mut mockito::ServerGuard,
    store: &Arc<MemoryCredentialStore>,
    manager: &SessionManager,
    token: &str,
) {
    store.save(&AuthToken::new(token), &user("u1", "Avi"));

    let profile = server
        .mock("GET", "/api/auth/profile")
        .match_header("authorization", format!("Bearer {token}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"user": user_json("u1", "Avi")}).to_string())
        .create_async()
        .await;

    manager.initialize().await;
    profile.assert_async().await;
}
