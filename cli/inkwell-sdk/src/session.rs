//! Login state of the current user.
//!
//! No credentials are checked here. Talking to the backend is the caller's
//! business.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

/// Avatar assigned to every freshly logged in profile.
pub const PLACEHOLDER_AVATAR: &str = "https://placeholder.co/100";

/// Simulated latency of [SessionStore::register].
pub const REGISTER_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub username: String,
    pub email: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub is_logged_in: bool,
    pub user_info: Profile,
}

/// Holds the [SessionState] in memory only.
#[derive(Debug)]
pub struct SessionStore {
    state: watch::Sender<SessionState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { state }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().is_logged_in
    }

    /// Mark the session as logged in.
    ///
    /// The username is the local part of `email`. The password is accepted
    /// as is.
    pub fn login(&self, email: &str, _password: &str) {
        let username = email.split_once('@').map_or(email, |(local, _)| local);
        debug!(username, "logging in");
        self.state.send_replace(SessionState {
            is_logged_in: true,
            user_info: Profile {
                username: username.to_string(),
                email: email.to_string(),
                avatar: PLACEHOLDER_AVATAR.to_string(),
            },
        });
    }

    /// Always succeeds after [REGISTER_DELAY]. The state is left alone.
    pub async fn register(&self, email: &str, username: &str, _password: &str) -> bool {
        debug!(email, username, "registering");
        tokio::time::sleep(REGISTER_DELAY).await;
        true
    }

    pub fn logout(&self) {
        debug!("logging out");
        self.state.send_replace(SessionState::default());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    use super::*;

    #[test]
    fn login_derives_username_from_email() {
        let store = SessionStore::new();
        store.login("reader@example.com", "pw");

        let state = store.state();
        assert!(state.is_logged_in);
        assert_eq!(state.user_info, Profile {
            username: "reader".to_string(),
            email: "reader@example.com".to_string(),
            avatar: PLACEHOLDER_AVATAR.to_string(),
        });
    }

    #[test]
    fn login_without_at_sign_uses_whole_email() {
        let store = SessionStore::new();
        store.login("reader", "");
        assert_eq!(store.state().user_info.username, "reader");
    }

    #[test]
    fn logout_restores_empty_profile() {
        let store = SessionStore::new();
        store.login("reader@example.com", "pw");
        store.logout();
        assert_eq!(store.state(), SessionState::default());
        assert_eq!(store.state().user_info.avatar, "");
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let store = SessionStore::new();
        let mut updates = store.subscribe();
        assert!(!updates.borrow_and_update().is_logged_in);

        store.login("a@b.c", "pw");
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update().user_info.username, "a");

        store.logout();
        updates.changed().await.unwrap();
        assert!(!updates.borrow().is_logged_in);
    }

    #[tokio::test(start_paused = true)]
    async fn register_resolves_true_after_delay() {
        let store = SessionStore::new();
        let start = Instant::now();
        assert!(store.register("a@b.c", "a", "pw").await);
        assert!(start.elapsed() >= REGISTER_DELAY);
        assert!(!store.is_logged_in());
    }
}
