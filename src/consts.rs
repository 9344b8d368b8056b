//! Shared constants: storage keys, host selectors, element ids, and visual defaults.

use crate::dom::Selector;

// ── Logging ─────────────────────────────────────────────────────

/// Log target used by every message this crate emits.
pub const LOG_TARGET: &str = "ui_tweaks";

// ── Storage keys ────────────────────────────────────────────────

pub const KEY_HIDE_TEAMS: &str = "tweak_hideTeams";
pub const KEY_HIDE_KB: &str = "tweak_hideKB";
pub const KEY_HIDE_LOGO: &str = "tweak_hideLogo";
pub const KEY_HIDE_PROFILE: &str = "tweak_hideProfile";
pub const KEY_HIDE_CHAT_PROFILES: &str = "tweak_hideChatProfiles";
pub const KEY_HIDE_PINNED_CHARS: &str = "tweak_hidePinnedChars";
pub const KEY_NEW_CHAT_BUTTON_COLOR: &str = "tweak_newChatButtonColor";
pub const KEY_WORKSPACE_ICON_COLOR: &str = "tweak_workspaceIconColor";
pub const KEY_WORKSPACE_FONT_COLOR: &str = "tweak_workspaceFontColor";
pub const KEY_CUSTOM_PAGE_TITLE: &str = "tweak_customPageTitle";
pub const KEY_SHOW_MODAL_BUTTON: &str = "tweak_showModalButton";
pub const KEY_CUSTOM_FONT_URL: &str = "tweak_customFontUrl";
pub const KEY_CUSTOM_FONT_FAMILY: &str = "tweak_customFontFamily";
pub const KEY_CUSTOM_FONT_WEIGHT: &str = "tweak_customFontWeight";
pub const KEY_CUSTOM_FONT_STYLE: &str = "tweak_customFontStyle";

// ── Visual defaults ─────────────────────────────────────────────
//
// Colour pickers cannot show "unset", so these are what they display
// when no override is stored. They are never written to the host DOM,
// except for the injected button icon which has no host colour to fall
// back to.

pub const NEW_CHAT_BUTTON_COLOR_VISUAL: &str = "#2563eb";
pub const WORKSPACE_ICON_COLOR_VISUAL: &str = "#9ca3af";
pub const WORKSPACE_FONT_COLOR_VISUAL: &str = "#d1d5db";

// ── Host selectors ──────────────────────────────────────────────

pub const TEAMS_TAB: Selector = Selector::with("button", &[("data-element-id", "workspace-tab-teams")]);
pub const WORKSPACE_BAR: Selector = Selector::with("div", &[("data-element-id", "workspace-bar")]);
pub const LOGO_IMAGE: Selector = Selector::with("img", &[("alt", "TypingMind"), ("src", "/logo.png")]);
pub const PROFILE_BUTTON: Selector = Selector::with("button", &[("data-element-id", "workspace-profile-button")]);
pub const PINNED_CHARACTERS: Selector =
    Selector::with("div", &[("data-element-id", "pinned-characters-container")]);
pub const NEW_CHAT_BUTTON: Selector = Selector::with("button", &[("data-element-id", "new-chat-button-in-side-bar")]);
pub const SETTINGS_TAB: Selector = Selector::with("button", &[("data-element-id", "workspace-tab-settings")]);
pub const CLOUD_SYNC_TAB: Selector = Selector::with("button", &[("data-element-id", "workspace-tab-cloudsync")]);

pub const BUTTON: Selector = Selector::tag("button");
pub const SPAN: Selector = Selector::tag("span");
pub const SVG: Selector = Selector::tag("svg");

/// Visible label of the knowledge-base tab inside the workspace bar.
pub const KB_LABEL: &str = "KB";

/// Visible label of the chat profiles button.
pub const CHAT_PROFILES_LABEL: &str = "Chat Profiles";

/// CSS selector the custom font rules are scoped to.
pub const FONT_SCOPE_SELECTOR: &str = "[data-element-id=\"chat-space-background\"]";

// ── Injected elements ───────────────────────────────────────────

pub const TWEAKS_BUTTON_ID: &str = "workspace-tab-tweaks";
pub const TWEAKS_BUTTON_TITLE: &str = "Open UI Tweaks";
pub const TWEAKS_BUTTON_LABEL: &str = "Tweaks";
pub const TWEAKS_LABEL_CLASS: &str = "font-normal self-stretch text-center text-xs leading-4 md:leading-none";
pub const TWEAKS_ICON_CLASS: &str = "w-5 h-5 flex-shrink-0";
pub const TWEAKS_ICON_PATH: &str = "M12 3c-4.97 0-9 4.03-9 9s4.03 9 9 9c.83 0 1.5-.67 1.5-1.5 0-.39-.15-.74-.39-1.01-.23-.26-.38-.61-.38-.99 0-.83.67-1.5 1.5-1.5H16c2.76 0 5-2.24 5-5 0-4.42-4.03-8-9-8zm-5.5 9c-.83 0-1.5-.67-1.5-1.5S5.67 9 6.5 9 8 9.67 8 10.5 7.33 12 6.5 12zm3-4c-.83 0-1.5-.67-1.5-1.5S8.67 5 9.5 5s1.5.67 1.5 1.5S10.33 8 9.5 8zm5 0c-.83 0-1.5-.67-1.5-1.5S13.67 5 14.5 5s1.5.67 1.5 1.5S15.33 8 14.5 8zm3 4c-.83 0-1.5-.67-1.5-1.5S16.67 9 17.5 9s1.5.67 1.5 1.5-.67 1.5-1.5 1.5z";

pub const FONT_STYLE_ELEMENT_ID: &str = "tweak-custom-font-style";
pub const PANEL_STYLE_ELEMENT_ID: &str = "tweak-modal-styles";

/// Attribute set on `<html>` the moment an instance installs.
pub const INSTALLED_MARKER_ATTR: &str = "data-ui-tweaks";

pub const OVERLAY_ID: &str = "tweak-modal-overlay";
pub const MODAL_ID: &str = "tweak-modal";
pub const FEEDBACK_ID: &str = "tweak-modal-feedback";
pub const SCROLL_ID: &str = "tweak-modal-scrollable-content";
pub const CLOSE_BUTTON_ID: &str = "tweak-modal-bottom-close";

// ── Panel text ──────────────────────────────────────────────────

pub const PANEL_HEADING: &str = "UI Tweaks";
pub const FEEDBACK_SAVED: &str = "Settings saved.";
pub const FEEDBACK_ERROR: &str = "Error saving settings.";
pub const FONT_SECTION_INTRO: &str = "Import and apply a custom font: ";

// ── Keyboard ────────────────────────────────────────────────────

/// Letter that, with Shift and the platform modifier, toggles the panel.
pub const PANEL_CHORD_KEY: &str = "T";

// ── Choices ─────────────────────────────────────────────────────

/// Keyword of every choice's default option, shown when nothing is stored.
pub const CHOICE_DEFAULT: &str = "normal";
