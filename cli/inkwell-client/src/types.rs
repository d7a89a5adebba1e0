//! Wire types shared by the API modules and the fixture data.
//!
//! All records are plain values transferred wholesale per request. Field names
//! follow the backend's camelCase JSON. Embedded author snapshots are copies
//! and may be stale relative to the canonical [UserInfo].

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
}

/// Partial profile update, only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterParams {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_notes: u64,
    pub published_notes: u64,
    pub total_likes: u64,
    pub followers: u64,
    pub following: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Note,
    Like,
    Follow,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub content: String,
    pub time: String,
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// Publication state of a note. Exactly two values exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
    #[default]
    Draft,
    Published,
}

impl Display for NoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteStatus::Draft => write!(f, "draft"),
            NoteStatus::Published => write!(f, "published"),
        }
    }
}

impl FromStr for NoteStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(NoteStatus::Draft),
            "published" => Ok(NoteStatus::Published),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status '{0}'")]
pub struct UnknownStatus(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAuthor {
    pub id: u64,
    pub name: String,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub content: String,
    pub author: CommentAuthor,
    pub create_time: String,
    pub likes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author: NoteAuthor,
    pub tags: Vec<String>,
    pub likes: u64,
    pub comments: Vec<Comment>,
    pub create_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    pub status: NoteStatus,
    /// Only meaningful relative to the requesting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_collected: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNoteParams {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub status: NoteStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNoteParams {
    pub id: u64,
    #[serde(flatten)]
    pub note: CreateNoteParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentParams {
    pub content: String,
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub is_private: bool,
    pub create_time: String,
    /// Denormalized; not guaranteed to equal `notes.len()`.
    pub note_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionParams {
    pub name: String,
    pub description: String,
    pub is_private: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
}

// ---------------------------------------------------------------------------
// Feeds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeData {
    pub hot_notes: Vec<Note>,
    pub recommended_notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreData {
    pub notes: Vec<Note>,
    pub tags: Vec<String>,
}

/// Acknowledgement body of endpoints that have nothing else to return.
///
/// `success` defaults to `false`, so any other JSON object, such as an error
/// body or an unrelated record, also decodes as a negative acknowledgement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

pub type Query = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    Published,
    Draft,
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Published => write!(f, "published"),
            StatusFilter::Draft => write!(f, "draft"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            other => other.parse::<NoteStatus>().map(|status| match status {
                NoteStatus::Draft => StatusFilter::Draft,
                NoteStatus::Published => StatusFilter::Published,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub query: Option<String>,
    pub tags: Vec<String>,
    pub status: Option<StatusFilter>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl SearchParams {
    /// Encode as query pairs. Unset values are omitted and tags repeat as
    /// `tags[]`.
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        if let Some(text) = &self.query {
            query.push(("query".to_string(), text.clone()));
        }
        for tag in &self.tags {
            query.push(("tags[]".to_string(), tag.clone()));
        }
        if let Some(status) = self.status {
            query.push(("status".to_string(), status.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("pageSize".to_string(), page_size.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    pub show_private: Option<bool>,
    pub search: Option<String>,
}

impl CollectionQuery {
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        if let Some(show_private) = self.show_private {
            query.push(("showPrivate".to_string(), show_private.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn note_status_accepts_only_two_values() {
        let published: NoteStatus = serde_json::from_value(json!("published")).unwrap();
        assert_eq!(published, NoteStatus::Published);
        assert!(serde_json::from_value::<NoteStatus>(json!("archived")).is_err());
    }

    #[test]
    fn statuses_parse_from_cli_words() {
        assert_eq!("published".parse(), Ok(NoteStatus::Published));
        assert_eq!("all".parse(), Ok(StatusFilter::All));
        assert_eq!("draft".parse(), Ok(StatusFilter::Draft));
        assert_eq!(
            "all".parse::<NoteStatus>(),
            Err(UnknownStatus("all".to_string()))
        );
    }

    #[test]
    fn update_note_params_flatten_into_one_object() {
        let params = UpdateNoteParams {
            id: 7,
            note: CreateNoteParams {
                title: "t".to_string(),
                content: "c".to_string(),
                tags: vec!["x".to_string()],
                status: NoteStatus::Draft,
            },
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"id": 7, "title": "t", "content": "c", "tags": ["x"], "status": "draft"})
        );
    }

    #[test]
    fn search_params_omit_unset_values() {
        let params = SearchParams {
            query: Some("solitude".to_string()),
            tags: vec!["a".to_string(), "b".to_string()],
            status: Some(StatusFilter::Published),
            page: None,
            page_size: Some(20),
        };
        assert_eq!(params.to_query(), vec![
            ("query".to_string(), "solitude".to_string()),
            ("tags[]".to_string(), "a".to_string()),
            ("tags[]".to_string(), "b".to_string()),
            ("status".to_string(), "published".to_string()),
            ("pageSize".to_string(), "20".to_string()),
        ]);
        assert!(SearchParams::default().to_query().is_empty());
    }

    #[test]
    fn ack_decodes_from_null_as_none() {
        let ack: Option<Ack> = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(ack, None);
        let ack: Option<Ack> = serde_json::from_value(json!({"success": true})).unwrap();
        assert_eq!(ack, Some(Ack { success: true }));
    }

    #[test]
    fn activity_kind_uses_type_key() {
        let activity: Activity = serde_json::from_value(json!({
            "id": 1, "type": "follow", "title": "t", "content": "c", "time": "now"
        }))
        .unwrap();
        assert_eq!(activity.kind, ActivityKind::Follow);
    }

    #[test]
    fn unrelated_object_is_a_negative_ack() {
        let ack: Ack = serde_json::from_value(json!({"message": "not found"})).unwrap();
        assert_eq!(ack, Ack { success: false });
    }
}
