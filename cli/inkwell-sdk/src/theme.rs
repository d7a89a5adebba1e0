//! Dark/light theme preference.

use std::sync::Arc;

use inkwell_client::{LocalStorage, StorageError, THEME_KEY};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::appearance::Appearance;

pub const DARK: &str = "dark";
pub const LIGHT: &str = "light";

/// The persisted word for a dark flag.
pub fn theme_name(dark: bool) -> &'static str {
    if dark { DARK } else { LIGHT }
}

/// Holds the dark flag, applies it to an [Appearance] and persists it under
/// [THEME_KEY].
#[derive(Debug)]
pub struct ThemeStore {
    is_dark: watch::Sender<bool>,
    storage: Arc<dyn LocalStorage>,
    appearance: Arc<dyn Appearance>,
}

impl ThemeStore {
    pub fn new(storage: Arc<dyn LocalStorage>, appearance: Arc<dyn Appearance>) -> Self {
        let (is_dark, _) = watch::channel(false);
        Self {
            is_dark,
            storage,
            appearance,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self.is_dark.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.is_dark.subscribe()
    }

    /// Load the initial flag and apply it.
    ///
    /// A persisted value wins. Without one, or with an unrecognised one, the
    /// environment preference decides. Nothing is persisted here.
    pub fn init_theme(&self) -> Result<bool, StorageError> {
        let dark = match self.storage.get_item(THEME_KEY)?.as_deref() {
            Some(DARK) => true,
            Some(LIGHT) => false,
            Some(other) => {
                warn!(value = other, "ignoring unknown persisted theme");
                self.appearance.prefers_dark()
            },
            None => self.appearance.prefers_dark(),
        };
        debug!(dark, "initialised theme");
        self.set(dark);
        Ok(dark)
    }

    /// Flip the flag, apply it and persist it.
    pub fn toggle_theme(&self) -> Result<bool, StorageError> {
        let dark = !self.is_dark();
        self.set(dark);
        self.storage.set_item(THEME_KEY, theme_name(dark))?;
        Ok(dark)
    }

    fn set(&self, dark: bool) {
        self.is_dark.send_replace(dark);
        self.appearance.apply(dark);
    }
}

#[cfg(test)]
mod tests {
    use inkwell_client::MemoryStorage;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::appearance::tests::RecordingAppearance;

    fn theme_store(
        items: &[(&str, &str)],
        prefers_dark: bool,
    ) -> (ThemeStore, Arc<MemoryStorage>, Arc<RecordingAppearance>) {
        let storage = Arc::new(MemoryStorage::with_items(items.iter().copied()));
        let appearance = Arc::new(RecordingAppearance::preferring(prefers_dark));
        let store = ThemeStore::new(storage.clone(), appearance.clone());
        (store, storage, appearance)
    }

    #[test]
    fn persisted_value_wins_over_preference() {
        let (store, _, appearance) = theme_store(&[(THEME_KEY, LIGHT)], true);
        assert!(!store.init_theme().unwrap());
        assert_eq!(appearance.applied(), vec![false]);

        let (store, _, _) = theme_store(&[(THEME_KEY, DARK)], false);
        assert!(store.init_theme().unwrap());
    }

    #[test]
    fn preference_used_without_persisted_value() {
        let (store, storage, appearance) = theme_store(&[], true);
        assert!(store.init_theme().unwrap());
        assert_eq!(appearance.applied(), vec![true]);
        assert_eq!(storage.get_item(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn unknown_persisted_value_falls_back_to_preference() {
        let (store, _, _) = theme_store(&[(THEME_KEY, "sepia")], true);
        assert!(store.init_theme().unwrap());
    }

    #[test]
    fn toggle_twice_restores_flag_and_persisted_string() {
        let (store, storage, appearance) = theme_store(&[(THEME_KEY, LIGHT)], false);
        store.init_theme().unwrap();

        assert!(store.toggle_theme().unwrap());
        assert_eq!(storage.get_item(THEME_KEY).unwrap().as_deref(), Some(DARK));

        assert!(!store.toggle_theme().unwrap());
        assert!(!store.is_dark());
        assert_eq!(storage.get_item(THEME_KEY).unwrap().as_deref(), Some(LIGHT));
        assert_eq!(appearance.applied(), vec![false, true, false]);
    }

    #[test]
    fn subscribers_see_toggles() {
        let (store, _, _) = theme_store(&[], false);
        let updates = store.subscribe();
        store.toggle_theme().unwrap();
        assert!(*updates.borrow());
    }
}
