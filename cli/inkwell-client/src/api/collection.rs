use serde_json::Value;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::*;

/// Collections and their membership.
#[derive(Debug, Clone, Copy)]
pub struct CollectionApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CollectionApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: Option<&CollectionQuery>) -> Result<Vec<Collection>, ApiError> {
        let query = query.map(CollectionQuery::to_query).unwrap_or_default();
        self.client.get("/collections", query).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<Collection, ApiError> {
        self.client
            .get(format!("/collections/{id}"), Query::new())
            .await
    }

    pub async fn create(&self, params: &CreateCollectionParams) -> Result<Collection, ApiError> {
        self.client.post("/collections", Some(params)).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: u64, patch: &CollectionPatch) -> Result<Collection, ApiError> {
        self.client.put(format!("/collections/{id}"), patch).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<Option<Ack>, ApiError> {
        self.client.delete(format!("/collections/{id}")).await
    }

    pub async fn add_note(
        &self,
        collection_id: u64,
        note_id: u64,
    ) -> Result<Option<Ack>, ApiError> {
        self.client
            .post(
                format!("/collections/{collection_id}/notes/{note_id}"),
                None::<&Value>,
            )
            .await
    }

    pub async fn remove_note(
        &self,
        collection_id: u64,
        note_id: u64,
    ) -> Result<Option<Ack>, ApiError> {
        self.client
            .delete(format!("/collections/{collection_id}/notes/{note_id}"))
            .await
    }
}
