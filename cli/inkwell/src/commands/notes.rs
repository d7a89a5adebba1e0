use anyhow::{Context, Result};
use bpaf::Bpaf;
use inkwell_client::types::{
    CreateNoteParams,
    NoteStatus,
    SearchParams,
    StatusFilter,
    UpdateNoteParams,
};
use tracing::instrument;

use super::{App, report_ack};
use crate::utils::message;

#[derive(Debug, Clone, Bpaf)]
pub enum NotesCommands {
    /// List notes, optionally filtered
    #[bpaf(command)]
    List(#[bpaf(external(list))] List),

    /// Show a single note
    #[bpaf(command)]
    Show(#[bpaf(external(note_id))] NoteId),

    /// Write a new note
    #[bpaf(command)]
    Create(#[bpaf(external(create))] Create),

    /// Change an existing note
    #[bpaf(command)]
    Update(#[bpaf(external(update))] Update),

    /// Delete a note
    #[bpaf(command)]
    Delete(#[bpaf(external(note_id))] NoteId),

    /// Like a note
    #[bpaf(command)]
    Like(#[bpaf(external(note_id))] NoteId),

    /// Take back a like
    #[bpaf(command)]
    Unlike(#[bpaf(external(note_id))] NoteId),

    /// Comment on a note
    #[bpaf(command)]
    Comment(#[bpaf(external(comment))] Comment),

    /// Like a comment
    #[bpaf(command)]
    LikeComment(#[bpaf(external(like_comment))] LikeComment),
}

impl NotesCommands {
    #[instrument(name = "notes", skip_all)]
    pub async fn handle(self, app: &App) -> Result<()> {
        let notes = app.client.notes();
        match self {
            NotesCommands::List(args) => {
                let found = notes.list(args.search_params().as_ref()).await?;
                message::json(&found)?;
            },
            NotesCommands::Show(NoteId { id }) => {
                let note = notes.get(id).await?;
                message::json(&note)?;
            },
            NotesCommands::Create(args) => {
                let note = notes.create(&args.params()).await?;
                message::created(format!("Created note {}", note.id));
                message::json(&note)?;
            },
            NotesCommands::Update(args) => {
                let current = notes
                    .get(args.id)
                    .await
                    .with_context(|| format!("Could not load note {}", args.id))?;
                let params = args.apply(CreateNoteParams {
                    title: current.title,
                    content: current.content,
                    tags: current.tags,
                    status: current.status,
                });
                let note = notes.update(&params).await?;
                message::updated(format!("Updated note {}", params.id));
                message::json(&note)?;
            },
            NotesCommands::Delete(NoteId { id }) => {
                report_ack(notes.delete(id).await?, format_args!("Deleted note {id}"));
            },
            NotesCommands::Like(NoteId { id }) => {
                report_ack(notes.like(id).await?, format_args!("Liked note {id}"));
            },
            NotesCommands::Unlike(NoteId { id }) => {
                report_ack(notes.unlike(id).await?, format_args!("Unliked note {id}"));
            },
            NotesCommands::Comment(Comment { id, content }) => {
                let comment = notes.add_comment(id, content).await?;
                message::created(format!("Commented on note {id}"));
                message::json(&comment)?;
            },
            NotesCommands::LikeComment(LikeComment { id, comment_id }) => {
                report_ack(
                    notes.like_comment(id, comment_id).await?,
                    format_args!("Liked comment {comment_id}"),
                );
            },
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Bpaf)]
pub struct NoteId {
    /// Id of the note
    #[bpaf(positional("note-id"))]
    id: u64,
}

#[derive(Debug, Clone, Bpaf)]
pub struct List {
    /// Only notes matching this text
    #[bpaf(long, argument("text"))]
    query: Option<String>,

    /// Only notes with this tag, may be repeated
    #[bpaf(long("tag"), argument("tag"))]
    tags: Vec<String>,

    /// One of 'all', 'published' or 'draft'
    #[bpaf(long, argument("status"))]
    status: Option<StatusFilter>,

    /// Page to show
    #[bpaf(long, argument("n"))]
    page: Option<u32>,

    /// Notes per page
    #[bpaf(long, argument("n"))]
    page_size: Option<u32>,
}

impl List {
    /// `None` if no filter was given.
    fn search_params(&self) -> Option<SearchParams> {
        let params = SearchParams {
            query: self.query.clone(),
            tags: self.tags.clone(),
            status: self.status,
            page: self.page,
            page_size: self.page_size,
        };
        (params != SearchParams::default()).then_some(params)
    }
}

#[derive(Debug, Clone, Bpaf)]
pub struct Create {
    /// Title of the note
    #[bpaf(long, argument("title"))]
    title: String,

    /// Body of the note
    #[bpaf(long, argument("text"))]
    content: String,

    /// Tag the note, may be repeated
    #[bpaf(long("tag"), argument("tag"))]
    tags: Vec<String>,

    /// Publish right away instead of saving a draft
    #[bpaf(long)]
    publish: bool,
}

impl Create {
    fn params(self) -> CreateNoteParams {
        CreateNoteParams {
            title: self.title,
            content: self.content,
            tags: self.tags,
            status: if self.publish {
                NoteStatus::Published
            } else {
                NoteStatus::Draft
            },
        }
    }
}

#[derive(Debug, Clone, Bpaf)]
pub struct Update {
    /// New title
    #[bpaf(long, argument("title"))]
    title: Option<String>,

    /// New body
    #[bpaf(long, argument("text"))]
    content: Option<String>,

    /// Replace the tags, may be repeated
    #[bpaf(long("tag"), argument("tag"))]
    tags: Vec<String>,

    /// Either 'draft' or 'published'
    #[bpaf(long, argument("status"))]
    status: Option<NoteStatus>,

    /// Id of the note
    #[bpaf(positional("note-id"))]
    id: u64,
}

impl Update {
    /// Overlay the given fields on `current`. Tags are kept unless new
    /// ones are given.
    fn apply(self, current: CreateNoteParams) -> UpdateNoteParams {
        UpdateNoteParams {
            id: self.id,
            note: CreateNoteParams {
                title: self.title.unwrap_or(current.title),
                content: self.content.unwrap_or(current.content),
                tags: if self.tags.is_empty() {
                    current.tags
                } else {
                    self.tags
                },
                status: self.status.unwrap_or(current.status),
            },
        }
    }
}

#[derive(Debug, Clone, Bpaf)]
pub struct Comment {
    /// Id of the note
    #[bpaf(positional("note-id"))]
    id: u64,

    /// The comment
    #[bpaf(positional("text"))]
    content: String,
}

#[derive(Debug, Clone, Bpaf)]
pub struct LikeComment {
    /// Id of the note
    #[bpaf(positional("note-id"))]
    id: u64,

    /// Id of the comment
    #[bpaf(positional("comment-id"))]
    comment_id: u64,
}

#[cfg(test)]
mod tests {
    use bpaf::Parser;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::tests::fixture_app;

    fn parse(args: &[&str]) -> NotesCommands {
        notes_commands().to_options().run_inner(args).unwrap()
    }

    #[test]
    fn list_without_filters_sends_no_params() {
        let NotesCommands::List(list) = parse(&["list"]) else {
            panic!("expected list");
        };
        assert_eq!(list.search_params(), None);
    }

    #[test]
    fn list_collects_filters() {
        let NotesCommands::List(list) =
            parse(&["list", "--tag", "a", "--tag", "b", "--status", "draft"])
        else {
            panic!("expected list");
        };
        assert_eq!(
            list.search_params(),
            Some(SearchParams {
                tags: vec!["a".to_string(), "b".to_string()],
                status: Some(StatusFilter::Draft),
                ..Default::default()
            })
        );
    }

    #[test]
    fn update_keeps_unset_fields() {
        let NotesCommands::Update(update) = parse(&["update", "--title", "New", "3"]) else {
            panic!("expected update");
        };
        let params = update.apply(CreateNoteParams {
            title: "Old".to_string(),
            content: "Body".to_string(),
            tags: vec!["history".to_string()],
            status: NoteStatus::Draft,
        });
        assert_eq!(params.id, 3);
        assert_eq!(params.note.title, "New");
        assert_eq!(params.note.content, "Body");
        assert_eq!(params.note.tags, vec!["history".to_string()]);
    }

    #[tokio::test]
    async fn commands_run_against_fixtures() {
        let app = fixture_app();
        for args in [
            &["list"][..],
            &["show", "1"],
            &["create", "--title", "t", "--content", "c", "--publish"],
            &["update", "--status", "published", "3"],
            &["delete", "3"],
            &["like", "5"],
            &["unlike", "5"],
            &["comment", "1", "nice"],
            &["like-comment", "1", "1"],
        ] {
            parse(args).handle(&app).await.unwrap();
        }
    }

    #[tokio::test]
    async fn showing_a_missing_note_fails() {
        let app = fixture_app();
        assert!(parse(&["show", "42"]).handle(&app).await.is_err());
    }
}
