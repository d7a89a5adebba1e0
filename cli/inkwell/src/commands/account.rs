use anyhow::{Context, Result};
use bpaf::Bpaf;
use inkwell_client::types::{LoginParams, RegisterParams};
use inkwell_client::TOKEN_KEY;
use tracing::instrument;

use super::{App, report_ack};
use crate::utils::message;

#[derive(Bpaf, Clone, Debug)]
pub struct Me {}

impl Me {
    #[instrument(name = "me", skip_all)]
    pub async fn handle(self, app: &App) -> Result<()> {
        let user = app.client.users().current_user().await?;
        message::json(&user)
    }
}

#[derive(Bpaf, Clone, Debug)]
pub struct Stats {}

impl Stats {
    #[instrument(name = "stats", skip_all)]
    pub async fn handle(self, app: &App) -> Result<()> {
        let stats = app.client.users().stats().await?;
        message::json(&stats)
    }
}

#[derive(Bpaf, Clone, Debug)]
pub struct Activities {}

impl Activities {
    #[instrument(name = "activities", skip_all)]
    pub async fn handle(self, app: &App) -> Result<()> {
        let activities = app.client.users().activities().await?;
        message::json(&activities)
    }
}

#[derive(Bpaf, Clone, Debug)]
pub struct Follow {
    /// Id of the user to follow
    #[bpaf(positional("user-id"))]
    user_id: u64,
}

impl Follow {
    #[instrument(name = "follow", skip_all)]
    pub async fn handle(self, app: &App) -> Result<()> {
        let ack = app.client.users().follow(self.user_id).await?;
        report_ack(ack, format_args!("Following user {}", self.user_id));
        Ok(())
    }
}

#[derive(Bpaf, Clone, Debug)]
pub struct Unfollow {
    /// Id of the user to stop following
    #[bpaf(positional("user-id"))]
    user_id: u64,
}

impl Unfollow {
    #[instrument(name = "unfollow", skip_all)]
    pub async fn handle(self, app: &App) -> Result<()> {
        let ack = app.client.users().unfollow(self.user_id).await?;
        report_ack(ack, format_args!("No longer following user {}", self.user_id));
        Ok(())
    }
}

#[derive(Bpaf, Clone, Debug)]
pub struct Login {
    /// Email address of the account
    #[bpaf(positional("email"))]
    email: String,

    /// Password of the account
    #[bpaf(long, argument("password"))]
    password: String,
}

impl Login {
    #[instrument(name = "login", skip_all)]
    pub async fn handle(self, app: &App) -> Result<()> {
        let params = LoginParams {
            email: self.email.clone(),
            password: self.password.clone(),
        };
        let user = app
            .client
            .users()
            .login(&params)
            .await
            .context("Could not log in")?;

        app.session.login(&self.email, &self.password);
        message::updated(format!(
            "Logged in as '{}'",
            app.session.state().user_info.username
        ));
        message::json(&user)
    }
}

#[derive(Bpaf, Clone, Debug)]
pub struct Register {
    /// Email address for the new account
    #[bpaf(positional("email"))]
    email: String,

    /// Name shown to other readers
    #[bpaf(long, argument("name"))]
    username: String,

    /// Password for the new account
    #[bpaf(long, argument("password"))]
    password: String,
}

impl Register {
    #[instrument(name = "register", skip_all)]
    pub async fn handle(self, app: &App) -> Result<()> {
        let params = RegisterParams {
            email: self.email.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        };
        app.client
            .users()
            .register(&params)
            .await
            .context("Could not register")?;

        if app
            .session
            .register(&self.email, &self.username, &self.password)
            .await
        {
            message::created(format!("Registered '{}'", self.username));
        }
        Ok(())
    }
}

#[derive(Bpaf, Clone, Debug)]
pub struct Logout {}

impl Logout {
    /// The local session ends even if the backend cannot be reached.
    #[instrument(name = "logout", skip_all)]
    pub async fn handle(self, app: &App) -> Result<()> {
        if let Err(e) = app.client.users().logout().await {
            message::warning(format!("Server did not acknowledge logout: {e}"));
        }
        app.session.logout();
        message::updated("Logged out");
        Ok(())
    }
}

#[derive(Bpaf, Clone, Debug)]
pub enum TokenCommands {
    /// Store a token sent with every request
    #[bpaf(command)]
    Set {
        #[bpaf(positional("token"))]
        token: String,
    },

    /// Remove the stored token
    #[bpaf(command)]
    Clear,
}

impl TokenCommands {
    pub fn handle(self, app: &App) -> Result<()> {
        match self {
            TokenCommands::Set { token } => {
                app.storage.set_item(TOKEN_KEY, &token)?;
                message::updated("Token stored");
            },
            TokenCommands::Clear => {
                app.storage.remove_item(TOKEN_KEY)?;
                message::deleted("Token removed");
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use inkwell_client::ApiError;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::tests::fixture_app;

    #[tokio::test]
    async fn login_fills_session() {
        let app = fixture_app();
        Login {
            email: "reader@example.com".to_string(),
            password: "pw".to_string(),
        }
        .handle(&app)
        .await
        .unwrap();

        let state = app.session.state();
        assert!(state.is_logged_in);
        assert_eq!(state.user_info.username, "reader");
    }

    #[tokio::test]
    async fn logout_without_fixture_still_clears_session() {
        let app = fixture_app();
        app.session.login("reader@example.com", "pw");
        assert!(matches!(
            app.client.users().logout().await,
            Err(ApiError::NoFixture { .. })
        ));

        Logout {}.handle(&app).await.unwrap();
        assert!(!app.session.is_logged_in());
    }

    #[test]
    fn token_set_and_clear() {
        let app = fixture_app();
        TokenCommands::Set {
            token: "abc".to_string(),
        }
        .handle(&app)
        .unwrap();
        assert_eq!(app.storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        TokenCommands::Clear.handle(&app).unwrap();
        assert_eq!(app.storage.get_item(TOKEN_KEY).unwrap(), None);
    }
}
