//! Resource sync controllers.
//!
//! One controller per entity kind keeps an in-memory collection consistent
//! with the backend's view of it. The discipline is refetch-after-mutate:
//! every successful create/update/delete/duplicate is followed by a full
//! `list()`, and the collection is never patched from locally guessed
//! results - the backend's list is always authoritative.

mod flyers;
mod products;

pub use flyers::FlyerCollection;
pub use products::ProductCollection;

use core::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::api::ApiClient;
use crate::error::OperationError;

/// An entity kind a [`SyncedCollection`] can manage.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection endpoint, e.g. `/api/products`.
    const ENDPOINT: &'static str;
    /// Singular noun for fallback messages and logging.
    const KIND: &'static str;

    /// ID type of the entity.
    type Id: fmt::Display + PartialEq + Send + Sync;
    /// Create/update payload.
    type Draft: serde::Serialize + Send + Sync;

    fn id(&self) -> &Self::Id;
}

/// Caller-confirmed intent for a destructive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// What a `remove` call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The entity was deleted and the collection refreshed.
    Removed,
    /// Confirmation was withheld; no request was issued.
    Cancelled,
}

/// The backend answers list requests either as a bare array or wrapped in a
/// `data` envelope; accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListResponse<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

/// An ordered collection of user-owned entities, rebuilt from the backend
/// after every mutation.
///
/// Methods take `&mut self`, so two operations on one collection can never
/// interleave and a response can never be applied to a collection that has
/// since been handed elsewhere - the failure policy "no partial mutation"
/// holds structurally: `items` changes only inside a successful `list()`.
pub struct SyncedCollection<R: Resource> {
    api: ApiClient,
    items: Vec<R>,
}

impl<R: Resource> SyncedCollection<R> {
    /// Create an empty controller over a dispatcher.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            items: Vec::new(),
        }
    }

    /// The current in-memory collection.
    #[must_use]
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Fetch the collection and replace the local copy.
    ///
    /// # Errors
    ///
    /// Surfaces the server's message, or "Failed to fetch `<kind>`s"; the
    /// local collection is untouched on failure.
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn list(&mut self) -> Result<&[R], OperationError> {
        let response: ListResponse<R> = self
            .api
            .get(R::ENDPOINT)
            .await
            .map_err(|e| OperationError::new(e, &format!("Failed to fetch {}s", R::KIND)))?;

        self.items = response.into_vec();
        Ok(&self.items)
    }

    /// Create an entity, then refresh the collection.
    ///
    /// # Errors
    ///
    /// Surfaces the server's message, or "Failed to save `<kind>`"; the
    /// local collection is untouched on failure.
    #[instrument(skip(self, draft), fields(kind = R::KIND))]
    pub async fn create(&mut self, draft: &R::Draft) -> Result<(), OperationError> {
        let _: serde_json::Value = self
            .api
            .post(R::ENDPOINT, draft)
            .await
            .map_err(|e| OperationError::new(e, &format!("Failed to save {}", R::KIND)))?;

        self.list().await?;
        Ok(())
    }

    /// Update an entity, then refresh the collection.
    ///
    /// # Errors
    ///
    /// Surfaces the server's message, or "Failed to save `<kind>`"; the
    /// local collection is untouched on failure.
    #[instrument(skip(self, draft), fields(kind = R::KIND, id = %id))]
    pub async fn update(&mut self, id: &R::Id, draft: &R::Draft) -> Result<(), OperationError> {
        let path = format!("{}/{}", R::ENDPOINT, id);
        let _: serde_json::Value = self
            .api
            .put(&path, draft)
            .await
            .map_err(|e| OperationError::new(e, &format!("Failed to save {}", R::KIND)))?;

        self.list().await?;
        Ok(())
    }

    /// Delete an entity, then refresh the collection.
    ///
    /// Deletion is destructive, so it requires explicit caller-confirmed
    /// intent: with [`Confirmation::Cancelled`] no request is issued at all.
    ///
    /// # Errors
    ///
    /// Surfaces the server's message, or "Failed to delete `<kind>`"; the
    /// local collection is untouched on failure.
    #[instrument(skip(self), fields(kind = R::KIND, id = %id))]
    pub async fn remove(
        &mut self,
        id: &R::Id,
        confirmation: Confirmation,
    ) -> Result<RemoveOutcome, OperationError> {
        if confirmation == Confirmation::Cancelled {
            tracing::debug!("delete not confirmed; skipping");
            return Ok(RemoveOutcome::Cancelled);
        }

        let path = format!("{}/{}", R::ENDPOINT, id);
        self.api
            .delete(&path)
            .await
            .map_err(|e| OperationError::new(e, &format!("Failed to delete {}", R::KIND)))?;

        self.list().await?;
        Ok(RemoveOutcome::Removed)
    }
}
