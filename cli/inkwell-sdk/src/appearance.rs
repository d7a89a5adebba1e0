//! The visual surface a theme is applied to.

use std::fmt::Debug;
use std::sync::Mutex;

use tracing::debug;

/// Environment variable holding `<foreground>;<background>` colour indexes,
/// set by several terminal emulators.
pub const COLORFGBG: &str = "COLORFGBG";

pub trait Appearance: Debug + Send + Sync {
    /// Whether the environment asks for a dark colour scheme.
    fn prefers_dark(&self) -> bool;

    /// Switch the surface to the dark or light scheme.
    fn apply(&self, dark: bool);
}

type ApplyHook = Box<dyn Fn(bool) + Send + Sync>;

/// Appearance of the controlling terminal.
///
/// The preference is read from [COLORFGBG]. The applied flag is recorded
/// and handed to the hook set with [TerminalAppearance::on_apply], which
/// renders output with it.
#[derive(Default)]
pub struct TerminalAppearance {
    applied: Mutex<Option<bool>>,
    hook: Option<ApplyHook>,
}

impl Debug for TerminalAppearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalAppearance")
            .field("applied", &self.applied())
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl TerminalAppearance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `hook` with every applied flag.
    pub fn on_apply(mut self, hook: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// The flag passed to the last [Appearance::apply] call.
    pub fn applied(&self) -> Option<bool> {
        *self.applied.lock().expect("appearance lock poisoned")
    }
}

impl Appearance for TerminalAppearance {
    fn prefers_dark(&self) -> bool {
        std::env::var(COLORFGBG)
            .ok()
            .and_then(|value| dark_background(&value))
            .unwrap_or(false)
    }

    fn apply(&self, dark: bool) {
        debug!(dark, "applying terminal appearance");
        *self.applied.lock().expect("appearance lock poisoned") = Some(dark);
        if let Some(hook) = &self.hook {
            hook(dark);
        }
    }
}

/// Interpret a `COLORFGBG` value.
///
/// The background is the last field. Indexes 0 to 6 and 8 are the dark
/// colours of the 16 colour palette. Returns `None` if the value cannot be
/// parsed.
pub fn dark_background(value: &str) -> Option<bool> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(background, 0..=6 | 8))
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Records every applied flag.
    #[derive(Debug, Default)]
    pub struct RecordingAppearance {
        pub prefers_dark: bool,
        pub applied: Mutex<Vec<bool>>,
    }

    impl RecordingAppearance {
        pub fn preferring(dark: bool) -> Self {
            Self {
                prefers_dark: dark,
                ..Default::default()
            }
        }

        pub fn applied(&self) -> Vec<bool> {
            self.applied.lock().unwrap().clone()
        }
    }

    impl Appearance for RecordingAppearance {
        fn prefers_dark(&self) -> bool {
            self.prefers_dark
        }

        fn apply(&self, dark: bool) {
            self.applied.lock().unwrap().push(dark);
        }
    }

    #[test]
    fn parses_colorfgbg() {
        assert_eq!(dark_background("15;0"), Some(true));
        assert_eq!(dark_background("0;15"), Some(false));
        assert_eq!(dark_background("15;default;8"), Some(true));
        assert_eq!(dark_background("0;7"), Some(false));
        assert_eq!(dark_background("default"), None);
        assert_eq!(dark_background(""), None);
    }

    #[test]
    fn terminal_reads_preference_from_env() {
        let appearance = TerminalAppearance::new();
        temp_env::with_var(COLORFGBG, Some("15;0"), || {
            assert!(appearance.prefers_dark());
        });
        temp_env::with_var(COLORFGBG, Some("0;15"), || {
            assert!(!appearance.prefers_dark());
        });
        temp_env::with_var_unset(COLORFGBG, || {
            assert!(!appearance.prefers_dark());
        });
    }

    #[test]
    fn terminal_records_applied_flag() {
        let appearance = TerminalAppearance::new();
        assert_eq!(appearance.applied(), None);
        appearance.apply(true);
        assert_eq!(appearance.applied(), Some(true));
    }

    #[test]
    fn terminal_passes_applied_flag_to_hook() {
        let seen = std::sync::Arc::new(Mutex::new(Vec::new()));
        let appearance = TerminalAppearance::new().on_apply({
            let seen = seen.clone();
            move |dark| seen.lock().unwrap().push(dark)
        });
        appearance.apply(true);
        appearance.apply(false);
        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
        assert_eq!(appearance.applied(), Some(false));
    }
}
