//! Panel layout and the mapping between controls and preference edits.

use crate::consts::{CHOICE_DEFAULT, FONT_SECTION_INTRO};
use crate::dom::{EventInfo, Listen};
use crate::prefs::{Pref, PrefKind};

/// One block of the panel body, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    /// Boxed list of checkboxes.
    Toggles(&'static [Pref]),
    /// A single labelled control with its reset button.
    Row(Pref),
    Divider,
    /// Boxed group with an introduction line.
    Group { intro: &'static str, rows: &'static [Pref] },
}

pub const LAYOUT: &[Block] = &[
    Block::Toggles(&[
        Pref::HideTeams,
        Pref::HideKb,
        Pref::HideLogo,
        Pref::HideProfile,
        Pref::HideChatProfiles,
        Pref::HidePinnedCharacters,
        Pref::ShowTweaksButton,
    ]),
    Block::Row(Pref::NewChatButtonColor),
    Block::Row(Pref::WorkspaceIconColor),
    Block::Row(Pref::WorkspaceFontColor),
    Block::Row(Pref::PageTitle),
    Block::Divider,
    Block::Group {
        intro: FONT_SECTION_INTRO,
        rows: &[Pref::FontUrl, Pref::FontFamily, Pref::FontWeight, Pref::FontStyle],
    },
];

/// A change requested through the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Checked(bool),
    Color(String),
    ResetColor,
    Text(String),
    ClearText,
    Choose(String),
    ResetChoice,
}

impl Edit {
    /// Edit carried by an event on the control for a preference of `kind`.
    pub fn from_event(kind: PrefKind, info: &EventInfo) -> Self {
        match kind {
            PrefKind::Flag { .. } => Self::Checked(info.checked),
            PrefKind::Color { .. } => Self::Color(info.value.clone()),
            PrefKind::Title | PrefKind::Text { .. } => Self::Text(info.value.clone()),
            PrefKind::Choice => Self::Choose(info.value.clone()),
        }
    }

    /// Edit performed by the reset/clear button next to a control, if it has one.
    pub fn reset_for(kind: PrefKind) -> Option<Self> {
        match kind {
            PrefKind::Flag { .. } => None,
            PrefKind::Color { .. } => Some(Self::ResetColor),
            PrefKind::Title | PrefKind::Text { .. } => Some(Self::ClearText),
            PrefKind::Choice => Some(Self::ResetChoice),
        }
    }

    /// What the control should show after a reset, or `None` for value edits.
    pub fn reset_display(&self, kind: PrefKind) -> Option<&'static str> {
        match (self, kind) {
            (Self::ResetColor, PrefKind::Color { visual_default }) => Some(visual_default),
            (Self::ClearText, _) => Some(""),
            (Self::ResetChoice, _) => Some(CHOICE_DEFAULT),
            _ => None,
        }
    }
}

/// DOM event a control reports edits through.
pub fn event_for(kind: PrefKind) -> Listen {
    match kind {
        PrefKind::Flag { .. } | PrefKind::Choice => Listen::Change,
        PrefKind::Color { .. } | PrefKind::Title | PrefKind::Text { .. } => Listen::Input,
    }
}

/// Element id of the control for `pref`.
pub fn control_id(pref: Pref) -> String {
    match pref.kind() {
        PrefKind::Flag { .. } => pref.key().to_owned(),
        PrefKind::Choice => format!("{}_select", pref.key()),
        PrefKind::Color { .. } | PrefKind::Title | PrefKind::Text { .. } => format!("{}_input", pref.key()),
    }
}

/// Caption of the button next to a control.
pub fn reset_label(kind: PrefKind) -> Option<&'static str> {
    match kind {
        PrefKind::Flag { .. } => None,
        PrefKind::Color { .. } | PrefKind::Choice => Some("Reset"),
        PrefKind::Title | PrefKind::Text { .. } => Some("Clear"),
    }
}

pub fn placeholder(pref: Pref) -> Option<&'static str> {
    match pref.kind() {
        PrefKind::Title => Some("Custom Page Title"),
        PrefKind::Text { placeholder } => Some(placeholder),
        _ => None,
    }
}

/// Every preference the layout places, in order.
#[cfg(test)]
pub(crate) fn laid_out_prefs() -> Vec<Pref> {
    LAYOUT
        .iter()
        .flat_map(|block| match block {
            Block::Toggles(prefs) => prefs.to_vec(),
            Block::Row(pref) => vec![*pref],
            Block::Divider => Vec::new(),
            Block::Group { rows, .. } => rows.to_vec(),
        })
        .collect()
}
