use anyhow::Result;
use bpaf::Bpaf;
use inkwell_sdk::theme::theme_name;
use serde_json::json;

use super::App;
use crate::utils::message;

#[derive(Bpaf, Clone, Debug)]
pub struct Theme {
    /// Switch between dark and light and remember the choice
    #[bpaf(long)]
    toggle: bool,
}

impl Theme {
    pub fn handle(self, app: &App) -> Result<()> {
        let mut dark = app.theme.is_dark();
        if self.toggle {
            dark = app.theme.toggle_theme()?;
            message::updated(format!("Switched to the {} theme", theme_name(dark)));
        }
        message::json(&json!({ "theme": theme_name(dark) }))
    }
}
