//! Host element lookups, one function per reconciliation rule.
//!
//! Everything this crate knows about TypingMind's markup lives here. When
//! the host app changes its DOM, the affected rule is fixed in one place.
//! Every lookup tolerates absence: `None` or an empty list means "skip".

#[cfg(test)]
#[path = "targets_test.rs"]
mod targets_test;

use crate::consts::*;
use crate::dom::{Dom, child_by_tag, closest};

/// The workspace bar (left icon rail) that scopes several rules.
pub fn workspace_bar<D: Dom>(dom: &D) -> Option<D::Element> {
    dom.find(None, &WORKSPACE_BAR)
}

pub fn teams_tab<D: Dom>(dom: &D) -> Option<D::Element> {
    dom.find(None, &TEAMS_TAB)
}

/// Bar buttons whose nested `span > span` label reads `KB`.
pub fn kb_tabs<D: Dom>(dom: &D, bar: &D::Element) -> Vec<D::Element> {
    dom.find_all(Some(bar), &BUTTON)
        .into_iter()
        .filter(|button| nested_label(dom, button).is_some_and(|label| dom.text_content(&label).trim() == KB_LABEL))
        .collect()
}

/// First `span` inside `button` whose parent is also a `span`.
fn nested_label<D: Dom>(dom: &D, button: &D::Element) -> Option<D::Element> {
    dom.find_all(Some(button), &SPAN)
        .into_iter()
        .find(|span| dom.parent(span).is_some_and(|parent| dom.tag_name(&parent) == "span"))
}

/// Logo and announcement block: the `div` two levels above the logo image.
pub fn logo_section<D: Dom>(dom: &D) -> Option<D::Element> {
    let logo = dom.find(None, &LOGO_IMAGE)?;
    let container = dom.parent(&dom.parent(&logo)?)?;
    (dom.tag_name(&container) == "div").then_some(container)
}

pub fn profile_button<D: Dom>(dom: &D) -> Option<D::Element> {
    dom.find(None, &PROFILE_BUTTON)
}

/// Every button containing a span labelled `Chat Profiles`.
pub fn chat_profiles_buttons<D: Dom>(dom: &D) -> Vec<D::Element> {
    let mut buttons: Vec<D::Element> = Vec::new();
    for span in dom.find_all(None, &SPAN) {
        if dom.text_content(&span).trim() != CHAT_PROFILES_LABEL {
            continue;
        }
        if let Some(button) = closest(dom, &span, "button") {
            if !buttons.contains(&button) {
                buttons.push(button);
            }
        }
    }
    buttons
}

pub fn pinned_characters<D: Dom>(dom: &D) -> Option<D::Element> {
    dom.find(None, &PINNED_CHARACTERS)
}

pub fn new_chat_button<D: Dom>(dom: &D) -> Option<D::Element> {
    dom.find(None, &NEW_CHAT_BUTTON)
}

/// Every icon in the bar.
pub fn bar_icons<D: Dom>(dom: &D, bar: &D::Element) -> Vec<D::Element> {
    dom.find_all(Some(bar), &SVG)
}

/// Every span in the bar with visible text.
pub fn bar_labels<D: Dom>(dom: &D, bar: &D::Element) -> Vec<D::Element> {
    dom.find_all(Some(bar), &SPAN).into_iter().filter(|span| !dom.text_content(span).trim().is_empty()).collect()
}

/// Settings tab the injected button is inserted in front of.
pub fn settings_tab<D: Dom>(dom: &D, bar: &D::Element) -> Option<D::Element> {
    dom.find(Some(bar), &SETTINGS_TAB)
}

/// Button whose classes the injected button copies: cloud sync, else profile.
pub fn style_reference<D: Dom>(dom: &D, bar: &D::Element) -> Option<D::Element> {
    dom.find(Some(bar), &CLOUD_SYNC_TAB).or_else(|| profile_button(dom))
}

/// The injected Tweaks button, if it has been created.
pub fn tweaks_button<D: Dom>(dom: &D) -> Option<D::Element> {
    dom.by_id(TWEAKS_BUTTON_ID)
}

/// Class attributes of a style reference: the button, `:scope > span`, and
/// `:scope > span > div`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonClasses {
    pub button: String,
    pub outer_span: Option<String>,
    pub icon_div: Option<String>,
}

pub fn button_classes<D: Dom>(dom: &D, reference: &D::Element) -> ButtonClasses {
    let class_of = |el: &D::Element| dom.attribute(el, "class").unwrap_or_default();
    let spans: Vec<D::Element> =
        dom.children(reference).into_iter().filter(|child| dom.tag_name(child) == "span").collect();
    let icon_div = spans.iter().find_map(|span| child_by_tag(dom, span, "div"));
    ButtonClasses {
        button: class_of(reference),
        outer_span: spans.first().map(class_of),
        icon_div: icon_div.as_ref().map(class_of),
    }
}
