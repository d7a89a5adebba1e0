use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;
use serde::Serialize;

/// Whether messages are coloured for a dark background.
///
/// Set through the theme's appearance hook, see [set_dark_theme].
static DARK_THEME: AtomicBool = AtomicBool::new(false);

pub(crate) fn set_dark_theme(dark: bool) {
    DARK_THEME.store(dark, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Warning,
    Error,
}

/// Colour of a message body. Bright colours read better on a dark
/// background, the dark variants on a light one.
fn tone_color(tone: Tone, dark: bool) -> Color {
    match (tone, dark) {
        (Tone::Success, true) => Color::Green,
        (Tone::Success, false) => Color::DarkGreen,
        (Tone::Warning, true) => Color::Yellow,
        (Tone::Warning, false) => Color::DarkYellow,
        (Tone::Error, true) => Color::Red,
        (Tone::Error, false) => Color::DarkRed,
    }
}

/// Colour `v` for the current theme, if stderr is a terminal.
fn toned(tone: Tone, v: impl Display) -> String {
    let text = v.to_string();
    if !std::io::stderr().is_tty() {
        return text;
    }
    let color = tone_color(tone, DARK_THEME.load(Ordering::Relaxed));
    text.with(color).to_string()
}

/// Write a message to stderr.
///
/// Command output goes to stdout through [json] so that it can be piped.
fn print_message(v: impl Display) {
    eprintln!("{v}");
}

pub(crate) fn plain(v: impl Display) {
    print_message(v);
}
pub(crate) fn error(v: impl Display) {
    print_message(std::format_args!("❌ ERROR: {}", toned(Tone::Error, v)));
}
pub(crate) fn created(v: impl Display) {
    print_message(std::format_args!("✨ {}", toned(Tone::Success, v)));
}
/// double width character, add an additional space for alignment
pub(crate) fn deleted(v: impl Display) {
    print_message(std::format_args!("🗑️  {v}"));
}
pub(crate) fn updated(v: impl Display) {
    print_message(std::format_args!("✅ {}", toned(Tone::Success, v)));
}
/// double width character, add an additional space for alignment
pub(crate) fn warning(v: impl Display) {
    print_message(std::format_args!("⚠️  {}", toned(Tone::Warning, v)));
}

/// Pretty print `value` as JSON on stdout.
pub(crate) fn json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dark_theme_uses_bright_colours() {
        assert_eq!(tone_color(Tone::Success, true), Color::Green);
        assert_eq!(tone_color(Tone::Warning, true), Color::Yellow);
        assert_eq!(tone_color(Tone::Error, true), Color::Red);
    }

    #[test]
    fn light_theme_uses_dark_colours() {
        assert_eq!(tone_color(Tone::Success, false), Color::DarkGreen);
        assert_eq!(tone_color(Tone::Warning, false), Color::DarkYellow);
        assert_eq!(tone_color(Tone::Error, false), Color::DarkRed);
    }
}
