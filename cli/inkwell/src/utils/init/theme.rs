use std::sync::Arc;

use anyhow::{Context, Result};
use inkwell_client::LocalStorage;
use inkwell_sdk::appearance::{Appearance, TerminalAppearance};
use inkwell_sdk::theme::{ThemeStore, theme_name};
use tracing::debug;

use crate::utils::message;

/// The terminal appearance, rendering messages for the applied theme.
pub fn terminal_appearance() -> Arc<dyn Appearance> {
    Arc::new(TerminalAppearance::new().on_apply(message::set_dark_theme))
}

/// Create the theme store and load the initial theme.
pub fn init_theme(
    storage: Arc<dyn LocalStorage>,
    appearance: Arc<dyn Appearance>,
) -> Result<ThemeStore> {
    let theme = ThemeStore::new(storage, appearance);
    let dark = theme.init_theme().context("Could not load the theme")?;
    debug!(theme = theme_name(dark), "using theme");
    Ok(theme)
}

#[cfg(test)]
mod tests {
    use inkwell_client::{MemoryStorage, THEME_KEY};
    use inkwell_sdk::theme::DARK;

    use super::*;

    #[test]
    fn persisted_theme_is_loaded() {
        let storage = Arc::new(MemoryStorage::with_items([(THEME_KEY, DARK)]));
        let appearance = Arc::new(TerminalAppearance::new());
        let theme = init_theme(storage, appearance.clone()).unwrap();
        assert!(theme.is_dark());
        assert_eq!(appearance.applied(), Some(true));
    }
}
