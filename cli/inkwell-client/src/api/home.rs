use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{HomeData, Query};

#[derive(Debug, Clone, Copy)]
pub struct HomeApi<'a> {
    client: &'a ApiClient,
}

impl<'a> HomeApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// The landing page aggregate.
    #[instrument(skip(self))]
    pub async fn home_data(&self) -> Result<HomeData, ApiError> {
        self.client.get("/home", Query::new()).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::client::tests::fixture_client;

    #[tokio::test]
    async fn home_data_from_fixtures() {
        let home = fixture_client().home().home_data().await.unwrap();
        let hot: Vec<u64> = home.hot_notes.iter().map(|note| note.id).collect();
        let recommended: Vec<u64> = home.recommended_notes.iter().map(|note| note.id).collect();
        assert_eq!(hot, vec![1, 2]);
        assert_eq!(recommended, vec![2, 3]);
    }
}
