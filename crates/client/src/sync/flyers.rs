//! Flyer collection controller.

use tracing::instrument;

use flyercraft_core::{Flyer, FlyerDraft, FlyerId};

use crate::error::OperationError;

use super::{Resource, SyncedCollection};

impl Resource for Flyer {
    const ENDPOINT: &'static str = "/api/flyers";
    const KIND: &'static str = "flyer";

    type Id = FlyerId;
    type Draft = FlyerDraft;

    fn id(&self) -> &FlyerId {
        &self.id
    }
}

/// Sync controller for the user's flyers.
pub type FlyerCollection = SyncedCollection<Flyer>;

impl SyncedCollection<Flyer> {
    /// Duplicate a flyer server-side, then refresh the collection.
    ///
    /// The duplicate endpoint takes an empty body; the backend copies the
    /// flyer and returns the new entity, which the trailing `list()` picks
    /// up.
    ///
    /// # Errors
    ///
    /// Surfaces the server's message, or "Failed to duplicate flyer"; the
    /// local collection is untouched on failure.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn duplicate(&mut self, id: &FlyerId) -> Result<(), OperationError> {
        let path = format!("{}/{}/duplicate", Self::endpoint(), id);
        let _: serde_json::Value = self
            .api()
            .post_empty(&path)
            .await
            .map_err(|e| OperationError::new(e, "Failed to duplicate flyer"))?;

        self.list().await?;
        Ok(())
    }

    const fn endpoint() -> &'static str {
        <Flyer as Resource>::ENDPOINT
    }
}
