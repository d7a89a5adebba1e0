//! Canned backend data for local development.
//!
//! [dispatch] maps a request path and method to the payload the backend
//! would return. It is consulted by
//! [FixtureTransport](crate::transport::FixtureTransport) when fixtures are
//! enabled and never touches the network.

use std::sync::LazyLock;

use reqwest::Method;
use serde_json::{json, Value};

const PLACEHOLDER_AVATAR: &str = "https://placeholder.co/100";

/// All canned entities, built once.
pub struct Fixtures {
    pub user: Value,
    pub notes: Vec<Value>,
    pub collections: Vec<Value>,
    pub stats: Value,
    pub activities: Value,
    pub tags: Vec<String>,
}

pub static FIXTURES: LazyLock<Fixtures> = LazyLock::new(Fixtures::new);

impl Fixtures {
    fn new() -> Self {
        let user = json!({
            "id": 1,
            "username": "literature_lover",
            "email": "reader@example.com",
            "avatar": PLACEHOLDER_AVATAR,
            "bio": "Loves reading, shares life",
            "followers": 1234,
            "following": 45
        });

        let notes = vec![
            json!({
                "id": 1,
                "title": "One Hundred Years of Solitude: the summit of magical realism",
                "content": "Márquez's novel is a stunning masterpiece. Through a century of the Buendía family it shows the wonder and the reality of Latin America...",
                "author": {
                    "id": 1,
                    "name": "literature_lover",
                    "avatar": PLACEHOLDER_AVATAR,
                    "followers": 1234
                },
                "tags": ["literature", "magical realism", "classics"],
                "likes": 328,
                "comments": [
                    {
                        "id": 1,
                        "content": "Beautifully written, a deep reading of magical realism!",
                        "author": {
                            "name": "avid_reader",
                            "avatar": PLACEHOLDER_AVATAR
                        },
                        "createTime": "2024-02-20 14:30",
                        "likes": 12
                    }
                ],
                "createTime": "2024-02-15",
                "status": "published",
                "isCollected": false
            }),
            json!({
                "id": 2,
                "title": "Science and philosophy in The Three-Body Problem",
                "content": "Liu Cixin's trilogy is not only great science fiction but also a philosophical work about humanity and civilization...",
                "author": {
                    "id": 2,
                    "name": "scifi_fan",
                    "avatar": PLACEHOLDER_AVATAR,
                    "followers": 856
                },
                "tags": ["science fiction", "philosophy", "civilization"],
                "likes": 256,
                "comments": [],
                "createTime": "2024-02-16",
                "status": "published",
                "isCollected": true
            }),
            json!({
                "id": 3,
                "title": "Sapiens: from the cognitive revolution to artificial intelligence",
                "content": "Harari takes a grand historical view, following humankind from the cognitive revolution to the agricultural revolution...",
                "author": {
                    "id": 3,
                    "name": "history_buff",
                    "avatar": PLACEHOLDER_AVATAR,
                    "followers": 678
                },
                "tags": ["history", "anthropology", "popular science"],
                "likes": 198,
                "comments": [],
                "createTime": "2024-02-17",
                "status": "draft",
                "isCollected": false
            }),
        ];

        let collections = vec![
            json!({
                "id": 1,
                "name": "Literature notes",
                "description": "Reading notes and impressions on literary works",
                "isPrivate": false,
                "createTime": "2024-02-10",
                "noteCount": 12,
                "notes": notes[0..2].to_vec()
            }),
            json!({
                "id": 2,
                "name": "Frontiers of technology",
                "description": "Thoughts on the latest developments in technology",
                "isPrivate": true,
                "createTime": "2024-02-15",
                "noteCount": 8,
                "notes": notes[1..3].to_vec()
            }),
        ];

        let stats = json!({
            "totalNotes": 15,
            "publishedNotes": 12,
            "totalLikes": 156,
            "followers": 23,
            "following": 45
        });

        let activities = json!([
            {
                "id": 1,
                "type": "note",
                "title": "Published a new note",
                "content": "Notes on The Three-Body Problem",
                "time": "2024-02-20 14:30"
            },
            {
                "id": 2,
                "type": "like",
                "title": "Received a like",
                "content": "Thoughts on Sapiens",
                "time": "2024-02-19 16:30"
            },
            {
                "id": 3,
                "type": "follow",
                "title": "New follower",
                "content": "zhang_san",
                "time": "2024-02-18 09:15"
            }
        ]);

        let tags = [
            "literature",
            "science fiction",
            "history",
            "philosophy",
            "psychology",
            "economics",
            "social science",
            "technology",
        ]
        .map(String::from)
        .to_vec();

        Self {
            user,
            notes,
            collections,
            stats,
            activities,
            tags,
        }
    }

    /// Notes in `start..end`, clamped to the available notes.
    fn notes_slice(&self, start: usize, end: usize) -> Value {
        let end = end.min(self.notes.len());
        let start = start.min(end);
        Value::Array(self.notes[start..end].to_vec())
    }

    fn home(&self) -> Value {
        json!({
            "hotNotes": self.notes_slice(0, 2),
            "recommendedNotes": self.notes_slice(1, 3),
        })
    }

    fn explore(&self) -> Value {
        json!({
            "notes": self.notes,
            "tags": self.tags,
        })
    }

    fn first_note(&self) -> Option<Value> {
        self.notes.first().cloned()
    }

    fn first_collection(&self) -> Option<Value> {
        self.collections.first().cloned()
    }

    fn first_note_comments(&self) -> Option<Value> {
        self.notes.first().map(|note| note["comments"].clone())
    }

    fn first_comment(&self) -> Option<Value> {
        self.notes
            .first()
            .and_then(|note| note["comments"].get(0))
            .cloned()
    }

    fn find_by_id(entities: &[Value], id: Option<&str>) -> Option<Value> {
        let id: u64 = id?.parse().ok()?;
        entities
            .iter()
            .find(|entity| entity["id"].as_u64() == Some(id))
            .cloned()
    }
}

fn success() -> Value {
    json!({ "success": true })
}

/// The id segment of `/<resource>/<id>/...`.
fn id_segment(path: &str) -> Option<&str> {
    path.split('/').nth(2)
}

/// Canned payload for `method path`, or `None` if nothing matches.
///
/// The path must not carry a query string. The first matching rule wins.
pub fn dispatch(path: &str, method: &Method) -> Option<Value> {
    let fixtures = &*FIXTURES;

    if path.starts_with("/auth") {
        match path {
            "/auth/login" => return Some(fixtures.user.clone()),
            "/auth/register" => return Some(success()),
            _ => {},
        }
    }

    if path.starts_with("/users") {
        match path {
            "/users/me" => return Some(fixtures.user.clone()),
            "/users/me/stats" => return Some(fixtures.stats.clone()),
            "/users/me/activities" => return Some(fixtures.activities.clone()),
            _ if path.contains("/follow") => return Some(success()),
            _ => {},
        }
    }

    if path.starts_with("/notes") {
        match *method {
            Method::GET => {
                if path == "/notes" {
                    return Some(Value::Array(fixtures.notes.clone()));
                }
                if let Some(id) = id_segment(path).filter(|id| !id.is_empty()) {
                    if path.contains("/comments") {
                        return fixtures.first_note_comments();
                    }
                    return Fixtures::find_by_id(&fixtures.notes, Some(id));
                }
            },
            Method::POST => {
                if path.contains("/comments") {
                    return fixtures.first_comment();
                }
                if path.contains("/like") {
                    return Some(success());
                }
                return fixtures.first_note();
            },
            Method::PUT => return fixtures.first_note(),
            Method::DELETE => return Some(success()),
            _ => {},
        }
    }

    if path.starts_with("/collections") {
        match *method {
            Method::GET => {
                if path == "/collections" {
                    return Some(Value::Array(fixtures.collections.clone()));
                }
                return Fixtures::find_by_id(&fixtures.collections, id_segment(path));
            },
            Method::POST | Method::PUT => return fixtures.first_collection(),
            Method::DELETE => return Some(success()),
            _ => {},
        }
    }

    if path == "/home" {
        return Some(fixtures.home());
    }

    if path.starts_with("/explore") {
        match path {
            "/explore" => return Some(fixtures.explore()),
            "/explore/hot" => return Some(fixtures.notes_slice(0, 2)),
            "/explore/recommended" => return Some(fixtures.notes_slice(2, 4)),
            "/explore/tags" => return Some(json!(fixtures.tags)),
            _ => {},
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde::de::DeserializeOwned;

    use super::*;
    use crate::types::*;

    fn get<T: DeserializeOwned>(path: &str, method: Method) -> T {
        let payload = dispatch(path, &method).unwrap_or_else(|| panic!("no fixture for {path}"));
        serde_json::from_value(payload).unwrap()
    }

    fn ids(notes: &[Note]) -> Vec<u64> {
        notes.iter().map(|note| note.id).collect()
    }

    #[test]
    fn auth_and_user_routes_have_declared_shapes() {
        let user: UserInfo = get("/auth/login", Method::POST);
        assert_eq!(user.id, 1);
        assert_eq!(get::<Ack>("/auth/register", Method::POST), Ack { success: true });
        assert_eq!(get::<UserInfo>("/users/me", Method::GET), user);
        assert_eq!(get::<UserStats>("/users/me/stats", Method::GET).total_notes, 15);
        assert_eq!(get::<Vec<Activity>>("/users/me/activities", Method::GET).len(), 3);
        assert_eq!(get::<Ack>("/users/42/follow", Method::POST), Ack { success: true });
        assert_eq!(get::<Ack>("/users/42/follow", Method::DELETE), Ack { success: true });
    }

    #[test]
    fn logout_has_no_fixture() {
        assert_eq!(dispatch("/auth/logout", &Method::POST), None);
    }

    #[test]
    fn note_routes_have_declared_shapes() {
        assert_eq!(ids(&get::<Vec<Note>>("/notes", Method::GET)), vec![1, 2, 3]);
        assert_eq!(get::<Vec<Comment>>("/notes/2/comments", Method::GET).len(), 1);
        assert_eq!(get::<Comment>("/notes/3/comments", Method::POST).id, 1);
        assert_eq!(get::<Note>("/notes", Method::POST).id, 1);
        assert_eq!(get::<Note>("/notes/3", Method::PUT).id, 1);
        assert_eq!(get::<Ack>("/notes/3", Method::DELETE), Ack { success: true });
        assert_eq!(get::<Ack>("/notes/3/like", Method::DELETE), Ack { success: true });
    }

    #[test]
    fn note_lookup_by_id() {
        for id in 1..=3 {
            assert_eq!(get::<Note>(&format!("/notes/{id}"), Method::GET).id, id);
        }
        assert_eq!(dispatch("/notes/4", &Method::GET), None);
        assert_eq!(dispatch("/notes/abc", &Method::GET), None);
        assert_eq!(dispatch("/notes/", &Method::GET), None);
    }

    #[test]
    fn collection_lookup_by_id() {
        let all: Vec<Collection> = get("/collections", Method::GET);
        assert_eq!(all.len(), 2);
        let second: Collection = get("/collections/2", Method::GET);
        assert_eq!(second, all[1]);
        assert_eq!(dispatch("/collections/9", &Method::GET), None);
    }

    #[test]
    fn collection_note_count_is_denormalized() {
        let first: Collection = get("/collections/1", Method::GET);
        assert_eq!(first.note_count, 12);
        assert_eq!(ids(first.notes.as_deref().unwrap()), vec![1, 2]);
    }

    #[test]
    fn collection_writes() {
        assert_eq!(get::<Collection>("/collections", Method::POST).id, 1);
        assert_eq!(get::<Collection>("/collections/2", Method::PUT).id, 1);
        assert_eq!(get::<Collection>("/collections/2/notes/1", Method::POST).id, 1);
        assert_eq!(get::<Ack>("/collections/2", Method::DELETE), Ack { success: true });
    }

    #[test]
    fn feeds_have_declared_shapes() {
        let home: HomeData = get("/home", Method::GET);
        assert_eq!(ids(&home.hot_notes), vec![1, 2]);
        assert_eq!(ids(&home.recommended_notes), vec![2, 3]);

        let explore: ExploreData = get("/explore", Method::GET);
        assert_eq!(ids(&explore.notes), vec![1, 2, 3]);
        assert_eq!(explore.tags.len(), 8);
        assert_eq!(get::<Vec<String>>("/explore/tags", Method::GET), explore.tags);
    }

    #[test]
    fn explore_hot_is_first_two_notes_in_order() {
        let hot: Vec<Note> = get("/explore/hot", Method::GET);
        assert_eq!(ids(&hot), vec![1, 2]);
        assert_eq!(hot[0].comments.len(), 1);
        assert_eq!(hot[1].is_collected, Some(true));
    }

    #[test]
    fn explore_recommended_is_clamped_to_available_notes() {
        let recommended: Vec<Note> = get("/explore/recommended", Method::GET);
        assert_eq!(ids(&recommended), vec![3]);
    }

    #[test]
    fn unknown_routes_return_none() {
        assert_eq!(dispatch("/", &Method::GET), None);
        assert_eq!(dispatch("/auth/whoami", &Method::GET), None);
        assert_eq!(dispatch("/users/me/settings", &Method::GET), None);
        assert_eq!(dispatch("/notes/1", &Method::PATCH), None);
        assert_eq!(dispatch("/explore/random", &Method::GET), None);
        assert_eq!(dispatch("/homepage", &Method::GET), None);
    }

    proptest! {
        #[test]
        fn like_always_succeeds(id in any::<u64>()) {
            let payload = dispatch(&format!("/notes/{id}/like"), &Method::POST);
            prop_assert_eq!(payload, Some(json!({"success": true})));
        }

        #[test]
        fn unrelated_prefixes_never_match(segment in "[a-z]{1,12}") {
            prop_assume!(!["auth", "users", "notes", "collections", "home", "explore"]
                .iter()
                .any(|prefix| segment.starts_with(prefix)));
            prop_assert_eq!(dispatch(&format!("/{segment}"), &Method::GET), None);
        }
    }
}
