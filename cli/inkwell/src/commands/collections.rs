use anyhow::Result;
use bpaf::Bpaf;
use inkwell_client::types::{CollectionPatch, CollectionQuery, CreateCollectionParams};
use tracing::instrument;

use super::{App, report_ack};
use crate::utils::message;

#[derive(Debug, Clone, Bpaf)]
pub enum CollectionsCommands {
    /// List collections
    #[bpaf(command)]
    List(#[bpaf(external(list))] List),

    /// Show a collection with its notes
    #[bpaf(command)]
    Show(#[bpaf(external(collection_id))] CollectionId),

    /// Create a collection
    #[bpaf(command)]
    Create(#[bpaf(external(create))] Create),

    /// Rename or describe a collection
    #[bpaf(command)]
    Update(#[bpaf(external(update))] Update),

    /// Delete a collection, the notes in it are kept
    #[bpaf(command)]
    Delete(#[bpaf(external(collection_id))] CollectionId),

    /// Add a note to a collection
    #[bpaf(command)]
    Add(#[bpaf(external(membership))] Membership),

    /// Remove a note from a collection
    #[bpaf(command)]
    Remove(#[bpaf(external(membership))] Membership),
}

impl CollectionsCommands {
    #[instrument(name = "collections", skip_all)]
    pub async fn handle(self, app: &App) -> Result<()> {
        let collections = app.client.collections();
        match self {
            CollectionsCommands::List(args) => {
                let found = collections.list(args.query().as_ref()).await?;
                message::json(&found)?;
            },
            CollectionsCommands::Show(CollectionId { id }) => {
                message::json(&collections.get(id).await?)?;
            },
            CollectionsCommands::Create(args) => {
                let collection = collections.create(&args.params()).await?;
                message::created(format!("Created collection '{}'", collection.name));
                message::json(&collection)?;
            },
            CollectionsCommands::Update(Update { id, patch }) => {
                let collection = collections.update(id, &patch.into()).await?;
                message::updated(format!("Updated collection {id}"));
                message::json(&collection)?;
            },
            CollectionsCommands::Delete(CollectionId { id }) => {
                report_ack(
                    collections.delete(id).await?,
                    format_args!("Deleted collection {id}"),
                );
            },
            CollectionsCommands::Add(Membership {
                collection_id,
                note_id,
            }) => {
                report_ack(
                    collections.add_note(collection_id, note_id).await?,
                    format_args!("Added note {note_id} to collection {collection_id}"),
                );
            },
            CollectionsCommands::Remove(Membership {
                collection_id,
                note_id,
            }) => {
                report_ack(
                    collections.remove_note(collection_id, note_id).await?,
                    format_args!("Removed note {note_id} from collection {collection_id}"),
                );
            },
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Bpaf)]
pub struct CollectionId {
    /// Id of the collection
    #[bpaf(positional("collection-id"))]
    id: u64,
}

#[derive(Debug, Clone, Bpaf)]
pub struct List {
    /// Include private collections
    #[bpaf(long)]
    private: bool,

    /// Only collections matching this text
    #[bpaf(long, argument("text"))]
    search: Option<String>,
}

impl List {
    fn query(&self) -> Option<CollectionQuery> {
        if !self.private && self.search.is_none() {
            return None;
        }
        Some(CollectionQuery {
            show_private: self.private.then_some(true),
            search: self.search.clone(),
        })
    }
}

#[derive(Debug, Clone, Bpaf)]
pub struct Create {
    /// Name of the collection
    #[bpaf(long, argument("name"))]
    name: String,

    /// What the collection is about
    #[bpaf(long, argument("text"), fallback(String::new()))]
    description: String,

    /// Hide the collection from other readers
    #[bpaf(long)]
    private: bool,
}

impl Create {
    fn params(self) -> CreateCollectionParams {
        CreateCollectionParams {
            name: self.name,
            description: self.description,
            is_private: self.private,
        }
    }
}

#[derive(Debug, Clone, Bpaf)]
pub struct Update {
    #[bpaf(external(patch))]
    patch: Patch,

    /// Id of the collection
    #[bpaf(positional("collection-id"))]
    id: u64,
}

#[derive(Debug, Clone, Bpaf)]
pub struct Patch {
    /// New name
    #[bpaf(long, argument("name"))]
    name: Option<String>,

    /// New description
    #[bpaf(long, argument("text"))]
    description: Option<String>,

    /// 'true' to hide the collection, 'false' to show it
    #[bpaf(long, argument("bool"))]
    private: Option<bool>,
}

impl From<Patch> for CollectionPatch {
    fn from(patch: Patch) -> Self {
        CollectionPatch {
            name: patch.name,
            description: patch.description,
            is_private: patch.private,
        }
    }
}

#[derive(Debug, Clone, Bpaf)]
pub struct Membership {
    /// Id of the collection
    #[bpaf(positional("collection-id"))]
    collection_id: u64,

    /// Id of the note
    #[bpaf(positional("note-id"))]
    note_id: u64,
}

#[cfg(test)]
mod tests {
    use bpaf::Parser;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::tests::fixture_app;

    fn parse(args: &[&str]) -> CollectionsCommands {
        collections_commands().to_options().run_inner(args).unwrap()
    }

    #[test]
    fn list_query_only_when_filtered() {
        let CollectionsCommands::List(list) = parse(&["list"]) else {
            panic!("expected list");
        };
        assert_eq!(list.query(), None);

        let CollectionsCommands::List(list) = parse(&["list", "--private"]) else {
            panic!("expected list");
        };
        assert_eq!(
            list.query().unwrap().to_query(),
            vec![("showPrivate".to_string(), "true".to_string())]
        );
    }

    #[test]
    fn patch_carries_only_given_fields() {
        let CollectionsCommands::Update(update) = parse(&["update", "--private", "false", "2"])
        else {
            panic!("expected update");
        };
        assert_eq!(update.id, 2);
        assert_eq!(CollectionPatch::from(update.patch), CollectionPatch {
            is_private: Some(false),
            ..Default::default()
        });
    }

    #[tokio::test]
    async fn commands_run_against_fixtures() {
        let app = fixture_app();
        for args in [
            &["list"][..],
            &["show", "2"],
            &["create", "--name", "Poetry"],
            &["update", "--name", "Verse", "1"],
            &["delete", "2"],
            &["add", "1", "3"],
            &["remove", "1", "3"],
        ] {
            parse(args).handle(&app).await.unwrap();
        }
    }
}
