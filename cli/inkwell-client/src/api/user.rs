use serde_json::Value;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::*;

/// Authentication, profile and social graph endpoints.
#[derive(Debug, Clone, Copy)]
pub struct UserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all)]
    pub async fn login(&self, params: &LoginParams) -> Result<UserInfo, ApiError> {
        self.client.post("/auth/login", Some(params)).await
    }

    pub async fn register(&self, params: &RegisterParams) -> Result<Option<Ack>, ApiError> {
        self.client.post("/auth/register", Some(params)).await
    }

    pub async fn logout(&self) -> Result<Option<Ack>, ApiError> {
        self.client.post("/auth/logout", None::<&Value>).await
    }

    pub async fn current_user(&self) -> Result<UserInfo, ApiError> {
        self.client.get("/users/me", Query::new()).await
    }

    pub async fn update_user_info(&self, patch: &ProfilePatch) -> Result<UserInfo, ApiError> {
        self.client.put("/users/me", patch).await
    }

    pub async fn stats(&self) -> Result<UserStats, ApiError> {
        self.client.get("/users/me/stats", Query::new()).await
    }

    pub async fn activities(&self) -> Result<Vec<Activity>, ApiError> {
        self.client.get("/users/me/activities", Query::new()).await
    }

    #[instrument(skip(self))]
    pub async fn follow(&self, user_id: u64) -> Result<Option<Ack>, ApiError> {
        self.client
            .post(format!("/users/{user_id}/follow"), None::<&Value>)
            .await
    }

    #[instrument(skip(self))]
    pub async fn unfollow(&self, user_id: u64) -> Result<Option<Ack>, ApiError> {
        self.client.delete(format!("/users/{user_id}/follow")).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::client::tests::fixture_client;
    use crate::types::*;

    #[tokio::test]
    async fn profile_endpoints_against_fixtures() {
        let client = fixture_client();
        let users = client.users();

        let me = users.current_user().await.unwrap();
        let logged_in = users
            .login(&LoginParams {
                email: "reader@example.com".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(me, logged_in);
        assert_eq!(me.bio.as_deref(), Some("Loves reading, shares life"));

        let updated = users
            .update_user_info(&ProfilePatch {
                bio: Some("new".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.id, me.id);

        assert_eq!(users.stats().await.unwrap().published_notes, 12);
        let activities = users.activities().await.unwrap();
        assert_eq!(activities[1].kind, ActivityKind::Like);
    }

    #[tokio::test]
    async fn social_endpoints_against_fixtures() {
        let users = fixture_client();
        let users = users.users();
        let success = Some(Ack { success: true });
        assert_eq!(users.follow(7).await.unwrap(), success);
        assert_eq!(users.unfollow(7).await.unwrap(), success);
        assert_eq!(
            users
                .register(&RegisterParams {
                    email: "new@example.com".to_string(),
                    username: "new".to_string(),
                    password: "pw".to_string(),
                })
                .await
                .unwrap(),
            success
        );
    }
}
