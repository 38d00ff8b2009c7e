//! Flyercraft client core.
//!
//! This crate owns the session lifecycle and the authenticated-request
//! pipeline for the Flyercraft backend, plus the sync controllers that keep
//! the product and flyer collections consistent with the server's view.
//!
//! # Components
//!
//! - [`store`] - durable credential storage ([`store::CredentialStore`])
//! - [`api`] - the request dispatcher ([`api::ApiClient`]): bearer
//!   injection and centralized teardown on authorization failure
//! - [`session`] - the session state machine and its operations
//!   ([`session::SessionManager`])
//! - [`sync`] - list/create/update/delete/duplicate controllers
//!   ([`sync::SyncedCollection`])
//!
//! # Wiring
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use flyercraft_client::api::ApiClient;
//! use flyercraft_client::config::ClientConfig;
//! use flyercraft_client::session::SessionManager;
//! use flyercraft_client::store::FileCredentialStore;
//! use flyercraft_client::sync::ProductCollection;
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let store = Arc::new(FileCredentialStore::new(config.state_dir.clone()));
//! let api = ApiClient::new(&config, store)?;
//!
//! let session = SessionManager::new(api.clone());
//! session.initialize().await;
//!
//! let mut products = ProductCollection::new(api);
//! products.list().await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod store;
pub mod sync;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, OperationError};
pub use session::{ProfileDraft, RegisterOutcome, SessionHandle, SessionManager, SessionStatus};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, PersistedCredential};
pub use sync::{
    Confirmation, FlyerCollection, ProductCollection, RemoveOutcome, Resource, SyncedCollection,
};
