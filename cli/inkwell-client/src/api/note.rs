use serde_json::Value;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::*;

/// Notes, likes and comments.
#[derive(Debug, Clone, Copy)]
pub struct NoteApi<'a> {
    client: &'a ApiClient,
}

impl<'a> NoteApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, params: Option<&SearchParams>) -> Result<Vec<Note>, ApiError> {
        let query = params.map(SearchParams::to_query).unwrap_or_default();
        self.client.get("/notes", query).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<Note, ApiError> {
        self.client.get(format!("/notes/{id}"), Query::new()).await
    }

    pub async fn create(&self, params: &CreateNoteParams) -> Result<Note, ApiError> {
        self.client.post("/notes", Some(params)).await
    }

    #[instrument(skip_all, fields(id = params.id))]
    pub async fn update(&self, params: &UpdateNoteParams) -> Result<Note, ApiError> {
        self.client
            .put(format!("/notes/{}", params.id), params)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<Option<Ack>, ApiError> {
        self.client.delete(format!("/notes/{id}")).await
    }

    pub async fn like(&self, id: u64) -> Result<Option<Ack>, ApiError> {
        self.client
            .post(format!("/notes/{id}/like"), None::<&Value>)
            .await
    }

    pub async fn unlike(&self, id: u64) -> Result<Option<Ack>, ApiError> {
        self.client.delete(format!("/notes/{id}/like")).await
    }

    pub async fn add_comment(
        &self,
        note_id: u64,
        content: impl Into<String>,
    ) -> Result<Comment, ApiError> {
        let body = CommentParams {
            content: content.into(),
        };
        self.client
            .post(format!("/notes/{note_id}/comments"), Some(&body))
            .await
    }

    pub async fn like_comment(
        &self,
        note_id: u64,
        comment_id: u64,
    ) -> Result<Option<Ack>, ApiError> {
        self.client
            .post(
                format!("/notes/{note_id}/comments/{comment_id}/like"),
                None::<&Value>,
            )
            .await
    }
}
