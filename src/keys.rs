//! Keyboard model: modifier keys, platform detection, and the panel chord.
//!
//! The chord is Shift + the platform modifier + `T`. macOS uses Command
//! (Meta); everything else uses Alt.

#[cfg(test)]
#[path = "keys_test.rs"]
mod keys_test;

use crate::consts::PANEL_CHORD_KEY;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// A key press as reported by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Key name from `KeyboardEvent.key` (e.g. `"T"`, `"Escape"`).
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyPress {
    #[must_use]
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self { key: key.into(), modifiers }
    }
}

/// Operating system family, as far as the chord is concerned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Platform {
    Mac,
    #[default]
    Other,
}

impl Platform {
    /// Classify a `navigator.userAgent` string.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.to_ascii_uppercase().contains("MAC") { Self::Mac } else { Self::Other }
    }

    /// Whether this platform's chord modifier is held.
    #[must_use]
    pub fn modifier_held(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Mac => modifiers.meta,
            Self::Other => modifiers.alt,
        }
    }

    /// Human-readable chord for log messages.
    #[must_use]
    pub fn chord_label(self) -> &'static str {
        match self {
            Self::Mac => "Shift+Cmd+T",
            Self::Other => "Shift+Alt+T",
        }
    }
}

/// Whether `press` is the chord that toggles the settings panel.
#[must_use]
pub fn is_panel_chord(press: &KeyPress, platform: Platform) -> bool {
    press.modifiers.shift && platform.modifier_held(press.modifiers) && press.key.eq_ignore_ascii_case(PANEL_CHORD_KEY)
}
