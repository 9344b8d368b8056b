//! Preference registry and the typed preference store.
//!
//! Every user setting is a [`Pref`]: a stable storage key, a kind, a default,
//! and a panel label. [`PrefStore`] reads and writes them over any
//! [`KeyValueStore`], decoding JSON where the value was stored as JSON and
//! normalizing free-text values on the way out.
//!
//! DESIGN
//! ======
//! Nothing is validated on write. Reads are where defaults apply, where
//! malformed JSON degrades to "absent", and where legacy hand-edited strings
//! (stray whitespace or quotes) are cleaned, so old values heal themselves
//! without a migration step.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::normalize_hex_color;
use crate::consts::*;
use crate::error::TweakError;
use crate::storage::KeyValueStore;

/// A user preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pref {
    HideTeams,
    HideKb,
    HideLogo,
    HideProfile,
    HideChatProfiles,
    HidePinnedCharacters,
    ShowTweaksButton,
    NewChatButtonColor,
    WorkspaceIconColor,
    WorkspaceFontColor,
    PageTitle,
    FontUrl,
    FontFamily,
    FontWeight,
    FontStyle,
}

/// Value shape of a preference, with its default and panel hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefKind {
    /// JSON boolean.
    Flag { default: bool },
    /// JSON hex string or `null`. The picker shows `visual_default` when unset.
    Color { visual_default: &'static str },
    /// Raw, non-JSON string. Absent means "keep the host's title".
    Title,
    /// JSON string or `null`.
    Text { placeholder: &'static str },
    /// JSON keyword of a [`Choice`] or `null`; the choice's default is unset.
    Choice,
}

impl Pref {
    /// Every preference, in panel order.
    pub const ALL: [Pref; 15] = [
        Pref::HideTeams,
        Pref::HideKb,
        Pref::HideLogo,
        Pref::HideProfile,
        Pref::HideChatProfiles,
        Pref::HidePinnedCharacters,
        Pref::ShowTweaksButton,
        Pref::NewChatButtonColor,
        Pref::WorkspaceIconColor,
        Pref::WorkspaceFontColor,
        Pref::PageTitle,
        Pref::FontUrl,
        Pref::FontFamily,
        Pref::FontWeight,
        Pref::FontStyle,
    ];

    /// Storage key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::HideTeams => KEY_HIDE_TEAMS,
            Self::HideKb => KEY_HIDE_KB,
            Self::HideLogo => KEY_HIDE_LOGO,
            Self::HideProfile => KEY_HIDE_PROFILE,
            Self::HideChatProfiles => KEY_HIDE_CHAT_PROFILES,
            Self::HidePinnedCharacters => KEY_HIDE_PINNED_CHARS,
            Self::ShowTweaksButton => KEY_SHOW_MODAL_BUTTON,
            Self::NewChatButtonColor => KEY_NEW_CHAT_BUTTON_COLOR,
            Self::WorkspaceIconColor => KEY_WORKSPACE_ICON_COLOR,
            Self::WorkspaceFontColor => KEY_WORKSPACE_FONT_COLOR,
            Self::PageTitle => KEY_CUSTOM_PAGE_TITLE,
            Self::FontUrl => KEY_CUSTOM_FONT_URL,
            Self::FontFamily => KEY_CUSTOM_FONT_FAMILY,
            Self::FontWeight => KEY_CUSTOM_FONT_WEIGHT,
            Self::FontStyle => KEY_CUSTOM_FONT_STYLE,
        }
    }

    #[must_use]
    pub fn kind(self) -> PrefKind {
        match self {
            Self::HideTeams
            | Self::HideKb
            | Self::HideLogo
            | Self::HideProfile
            | Self::HideChatProfiles
            | Self::HidePinnedCharacters => PrefKind::Flag { default: false },
            Self::ShowTweaksButton => PrefKind::Flag { default: true },
            Self::NewChatButtonColor => PrefKind::Color { visual_default: NEW_CHAT_BUTTON_COLOR_VISUAL },
            Self::WorkspaceIconColor => PrefKind::Color { visual_default: WORKSPACE_ICON_COLOR_VISUAL },
            Self::WorkspaceFontColor => PrefKind::Color { visual_default: WORKSPACE_FONT_COLOR_VISUAL },
            Self::PageTitle => PrefKind::Title,
            Self::FontUrl => PrefKind::Text { placeholder: "Font URL (e.g., Google Fonts)" },
            Self::FontFamily => PrefKind::Text { placeholder: "Font Family Name (e.g., 'Roboto')" },
            Self::FontWeight | Self::FontStyle => PrefKind::Choice,
        }
    }

    /// Keywords the panel offers for a choice preference; empty for the rest.
    #[must_use]
    pub fn options(self) -> Vec<String> {
        match self {
            Self::FontWeight => FontWeight::keywords(),
            Self::FontStyle => FontStyle::keywords(),
            _ => Vec::new(),
        }
    }

    /// Label shown next to the control in the settings panel.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::HideTeams => "Hide 'Teams' menu item",
            Self::HideKb => "Hide 'KB' menu item",
            Self::HideLogo => "Hide Logo & Announcement section",
            Self::HideProfile => "Hide 'Profile' button",
            Self::HideChatProfiles => "Hide 'Chat Profiles' button",
            Self::HidePinnedCharacters => "Hide 'Characters' in New Chat",
            Self::ShowTweaksButton => "Show 'Tweaks' Button in Menu",
            Self::NewChatButtonColor => "New Chat Button Color:",
            Self::WorkspaceIconColor => "Menu Icon Color:",
            Self::WorkspaceFontColor => "Menu Font Color:",
            Self::PageTitle => "Custom Page Title:",
            Self::FontUrl => "Custom Font URL:",
            Self::FontFamily => "Font Family Name:",
            Self::FontWeight => "Font Weight:",
            Self::FontStyle => "Font Style:",
        }
    }
}

impl fmt::Display for Pref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A closed set of CSS keywords offered by a select in the panel.
///
/// The serde representation is the keyword: it is what gets stored, what
/// the select lists, and what lands in the stylesheet.
pub trait Choice: Copy + PartialEq + Serialize + DeserializeOwned + 'static {
    /// Every option, in panel order.
    const ALL: &'static [Self];
    /// The option that stands for "unset".
    const DEFAULT: Self;

    /// CSS keyword for this option.
    fn keyword(self) -> String {
        match serde_json::to_value(self) {
            Ok(Value::String(keyword)) => keyword,
            _ => String::new(),
        }
    }

    /// Option named by `keyword`, if it is one.
    fn from_keyword(keyword: &str) -> Option<Self> {
        match serde_json::from_value(Value::String(keyword.to_owned())) {
            Ok(choice) => Some(choice),
            Err(_) => None,
        }
    }

    /// Every keyword, in panel order.
    fn keywords() -> Vec<String> {
        Self::ALL.iter().map(|choice| choice.keyword()).collect()
    }
}

/// Font weight choices offered by the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "bold")]
    Bold,
    #[serde(rename = "100")]
    W100,
    #[serde(rename = "200")]
    W200,
    #[serde(rename = "300")]
    W300,
    #[serde(rename = "400")]
    W400,
    #[serde(rename = "500")]
    W500,
    #[serde(rename = "600")]
    W600,
    #[serde(rename = "700")]
    W700,
    #[serde(rename = "800")]
    W800,
    #[serde(rename = "900")]
    W900,
}

impl Choice for FontWeight {
    const ALL: &'static [Self] = &[
        Self::Normal,
        Self::Bold,
        Self::W100,
        Self::W200,
        Self::W300,
        Self::W400,
        Self::W500,
        Self::W600,
        Self::W700,
        Self::W800,
        Self::W900,
    ];
    const DEFAULT: Self = Self::Normal;
}

/// Font style choices offered by the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}

impl Choice for FontStyle {
    const ALL: &'static [Self] = &[Self::Normal, Self::Italic, Self::Oblique];
    const DEFAULT: Self = Self::Normal;
}

/// Trim whitespace and strip one layer of matching `'` or `"` quotes.
///
/// Returns `None` when nothing is left.
pub fn clean_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|quote| {
            if trimmed.len() >= 2 && trimmed.starts_with(*quote) && trimmed.ends_with(*quote) {
                Some(&trimmed[1..trimmed.len() - 1])
            } else {
                None
            }
        })
        .unwrap_or(trimmed)
        .trim();
    if unquoted.is_empty() { None } else { Some(unquoted.to_owned()) }
}

/// Typed access to preferences over a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct PrefStore<S> {
    store: S,
}

impl<S: KeyValueStore> PrefStore<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    // --- Generic access ---

    /// Decode the JSON value stored under `key`, or return `default` when the
    /// key is absent or its value does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(raw) = self.store.get_item(key) else {
            return default;
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                log::debug!(target: LOG_TARGET, "ignoring malformed value for {key}: {err}");
                default
            }
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TweakError::Encode`] if serialization fails or
    /// [`TweakError::StorageWrite`] if the store rejects the write.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), TweakError> {
        let raw = serde_json::to_string(value).map_err(|source| TweakError::Encode { key: key.to_owned(), source })?;
        self.store.set_item(key, &raw)
    }

    // --- Typed reads ---

    /// Current value of a flag preference. Non-flag preferences read as `false`.
    pub fn flag(&self, pref: Pref) -> bool {
        match pref.kind() {
            PrefKind::Flag { default } => self.get(pref.key(), default),
            _ => false,
        }
    }

    /// Stored colour override as canonical `#rrggbb`, or `None` for the host default.
    pub fn color(&self, pref: Pref) -> Option<String> {
        let stored: Option<String> = self.get(pref.key(), None);
        let stored = stored?;
        let normalized = normalize_hex_color(&stored);
        if normalized.is_none() {
            log::debug!(target: LOG_TARGET, "ignoring non-hex colour for {pref}: {stored}");
        }
        normalized
    }

    /// Colour the panel's picker should show: the override, or the visual default.
    pub fn color_or_visual(&self, pref: Pref) -> String {
        match (self.color(pref), pref.kind()) {
            (Some(color), _) => color,
            (None, PrefKind::Color { visual_default }) => visual_default.to_owned(),
            (None, _) => String::new(),
        }
    }

    /// Normalized free-text value, or `None` when unset or blank.
    ///
    /// Text and choice values may be stored JSON-encoded or, for legacy and
    /// hand-edited entries, as bare strings; both read the same.
    pub fn text(&self, pref: Pref) -> Option<String> {
        let raw = self.store.get_item(pref.key())?;
        if pref.kind() == PrefKind::Title {
            return clean_value(&raw);
        }
        match serde_json::from_str::<Option<String>>(&raw) {
            Ok(Some(decoded)) => clean_value(&decoded),
            Ok(None) => None,
            Err(_) => clean_value(&raw),
        }
    }

    /// Stored font weight, if it is one of the offered choices.
    pub fn font_weight(&self) -> Option<FontWeight> {
        self.choice(Pref::FontWeight)
    }

    /// Stored font style, if it is one of the offered choices.
    pub fn font_style(&self) -> Option<FontStyle> {
        self.choice(Pref::FontStyle)
    }

    /// Option the panel's select should show for a choice preference.
    pub fn choice_or_default(&self, pref: Pref) -> String {
        match pref {
            Pref::FontWeight => self.font_weight().unwrap_or(FontWeight::DEFAULT).keyword(),
            Pref::FontStyle => self.font_style().unwrap_or(FontStyle::DEFAULT).keyword(),
            _ => String::new(),
        }
    }

    fn choice<T: Choice>(&self, pref: Pref) -> Option<T> {
        let value = self.text(pref)?;
        let parsed = T::from_keyword(&value);
        if parsed.is_none() {
            log::debug!(target: LOG_TARGET, "ignoring unknown option for {pref}: {value}");
        }
        parsed
    }

    // --- Typed writes ---

    /// Store a flag.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub fn set_flag(&self, pref: Pref, value: bool) -> Result<(), TweakError> {
        self.set(pref.key(), &value)
    }

    /// Store a colour override, or the unset marker for `None`.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub fn set_color(&self, pref: Pref, value: Option<&str>) -> Result<(), TweakError> {
        self.set(pref.key(), &value)
    }

    /// Store a free-text value. Empty text stores the unset marker.
    ///
    /// The page title is stored raw and unset by removing the key; other
    /// text preferences are stored as JSON with `null` as the unset marker.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub fn set_text(&self, pref: Pref, value: &str) -> Result<(), TweakError> {
        let value = Some(value).filter(|v| !v.is_empty());
        match (pref.kind(), value) {
            (PrefKind::Title, Some(title)) => self.store.set_item(pref.key(), title),
            (PrefKind::Title, None) => self.store.remove_item(pref.key()),
            (_, value) => self.set(pref.key(), &value),
        }
    }

    /// Store a choice picked by keyword. The default option and unknown
    /// keywords store the unset marker.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub fn set_choice(&self, pref: Pref, keyword: &str) -> Result<(), TweakError> {
        match pref {
            Pref::FontWeight => self.set_typed_choice(pref, FontWeight::from_keyword(keyword)),
            Pref::FontStyle => self.set_typed_choice(pref, FontStyle::from_keyword(keyword)),
            _ => self.reset(pref),
        }
    }

    /// Store a font weight; `None` and the default store the unset marker.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub fn set_font_weight(&self, weight: Option<FontWeight>) -> Result<(), TweakError> {
        self.set_typed_choice(Pref::FontWeight, weight)
    }

    /// Store a font style; `None` and the default store the unset marker.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub fn set_font_style(&self, style: Option<FontStyle>) -> Result<(), TweakError> {
        self.set_typed_choice(Pref::FontStyle, style)
    }

    fn set_typed_choice<T: Choice>(&self, pref: Pref, value: Option<T>) -> Result<(), TweakError> {
        let value = value.filter(|choice| *choice != T::DEFAULT);
        self.set(pref.key(), &value)
    }

    /// Write the "use default" marker for `pref`.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub fn reset(&self, pref: Pref) -> Result<(), TweakError> {
        match pref.kind() {
            PrefKind::Flag { default } => self.set_flag(pref, default),
            PrefKind::Title => self.store.remove_item(pref.key()),
            PrefKind::Color { .. } | PrefKind::Text { .. } | PrefKind::Choice => {
                self.set(pref.key(), &Option::<String>::None)
            }
        }
    }
}
