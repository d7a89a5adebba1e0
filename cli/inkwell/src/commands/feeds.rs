use anyhow::Result;
use bpaf::Bpaf;
use inkwell_client::types::SearchParams;
use tracing::instrument;

use super::App;
use crate::utils::message;

#[derive(Bpaf, Clone, Debug)]
pub struct Home {}

impl Home {
    #[instrument(name = "home", skip_all)]
    pub async fn handle(self, app: &App) -> Result<()> {
        message::json(&app.client.home().home_data().await?)
    }
}

#[derive(Debug, Clone, Bpaf)]
pub enum ExploreCommands {
    /// All notes and the tag cloud
    #[bpaf(command)]
    Overview {
        /// Only notes with this tag, may be repeated
        #[bpaf(long("tag"), argument("tag"))]
        tags: Vec<String>,
    },

    /// Notes that are popular right now
    #[bpaf(command)]
    Hot,

    /// Notes picked for you
    #[bpaf(command)]
    Recommended,

    /// Tags in use
    #[bpaf(command)]
    Tags,
}

impl ExploreCommands {
    #[instrument(name = "explore", skip_all)]
    pub async fn handle(self, app: &App) -> Result<()> {
        let explore = app.client.explore();
        match self {
            ExploreCommands::Overview { tags } => {
                let params = (!tags.is_empty()).then(|| SearchParams {
                    tags,
                    ..Default::default()
                });
                message::json(&explore.explore_data(params.as_ref()).await?)
            },
            ExploreCommands::Hot => message::json(&explore.hot_notes().await?),
            ExploreCommands::Recommended => message::json(&explore.recommended_notes().await?),
            ExploreCommands::Tags => message::json(&explore.tags().await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use bpaf::Parser;
    use super::*;
    use crate::commands::tests::fixture_app;

    #[tokio::test]
    async fn feeds_run_against_fixtures() {
        let app = fixture_app();
        Home {}.handle(&app).await.unwrap();
        for args in [
            &["overview"][..],
            &["overview", "--tag", "history"],
            &["hot"],
            &["recommended"],
            &["tags"],
        ] {
            explore_commands()
                .to_options()
                .run_inner(args)
                .unwrap()
                .handle(&app)
                .await
                .unwrap();
        }
    }
}
