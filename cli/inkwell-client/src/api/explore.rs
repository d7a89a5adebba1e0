use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{ExploreData, Note, Query, SearchParams};

/// Discovery feeds and the tag cloud.
#[derive(Debug, Clone, Copy)]
pub struct ExploreApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ExploreApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn explore_data(&self, params: Option<&SearchParams>) -> Result<ExploreData, ApiError> {
        let query = params.map(SearchParams::to_query).unwrap_or_default();
        self.client.get("/explore", query).await
    }

    pub async fn hot_notes(&self) -> Result<Vec<Note>, ApiError> {
        self.client.get("/explore/hot", Query::new()).await
    }

    pub async fn recommended_notes(&self) -> Result<Vec<Note>, ApiError> {
        self.client.get("/explore/recommended", Query::new()).await
    }

    pub async fn tags(&self) -> Result<Vec<String>, ApiError> {
        self.client.get("/explore/tags", Query::new()).await
    }
}
