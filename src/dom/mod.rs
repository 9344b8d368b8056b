//! Host document access.
//!
//! SYSTEM CONTEXT
//! ==============
//! The reconciler and the settings panel see the page only through [`Dom`].
//! In the browser it is backed by web-sys ([`browser::BrowserDom`]); in
//! tests by an in-memory tree that records every write, so idempotence and
//! element counts can be asserted without a browser.
//!
//! Element handles are never cached by callers across reconciliation passes:
//! the host framework may replace any node at any time.

#[cfg(feature = "browser")]
pub mod browser;
#[cfg(test)]
pub mod memory;

use std::fmt;

use crate::error::TweakError;
use crate::keys::KeyPress;

/// Tag plus exact attribute matches, e.g. `button[data-element-id="x"]`.
///
/// This is the only selector shape the host contract needs, and keeping it
/// structured lets the in-memory document match it without a CSS engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selector {
    pub tag: &'static str,
    pub attrs: &'static [(&'static str, &'static str)],
}

impl Selector {
    /// Match any element with this tag name.
    #[must_use]
    pub const fn tag(tag: &'static str) -> Self {
        Self { tag, attrs: &[] }
    }

    /// Match elements with this tag and every listed attribute value.
    #[must_use]
    pub const fn with(tag: &'static str, attrs: &'static [(&'static str, &'static str)]) -> Self {
        Self { tag, attrs }
    }

    /// Whether an element with `tag` and attribute lookup `attr` matches.
    pub fn matches(&self, tag: &str, attr: impl Fn(&str) -> Option<String>) -> bool {
        tag.eq_ignore_ascii_case(self.tag) && self.attrs.iter().all(|(name, value)| attr(name).as_deref() == Some(*value))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag)?;
        for (name, value) in self.attrs {
            write!(f, "[{name}=\"{value}\"]")?;
        }
        Ok(())
    }
}

/// Event kinds the crate listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Listen {
    /// Click that bubbles normally.
    Click,
    /// Click whose default action and propagation are suppressed.
    ExclusiveClick,
    /// `input` event (every keystroke / picker drag).
    Input,
    /// `change` event (checkbox toggle, select choice).
    Change,
}

/// What a listener learns about the event that fired.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventInfo {
    /// The event target is the element the listener is attached to.
    pub on_self: bool,
    /// Target's `value` for inputs and selects, empty otherwise.
    pub value: String,
    /// Target's `checked` for checkboxes.
    pub checked: bool,
}

/// Handler for element events.
pub type EventHandler = Box<dyn Fn(&EventInfo)>;

/// Handler for document key presses. Returns `true` when it consumed the key.
pub type KeyHandler = Box<dyn Fn(&KeyPress) -> bool>;

/// The operations the crate performs on the host document.
///
/// Lookups return nothing rather than failing; a missing target is the
/// normal case while the host app is still rendering.
pub trait Dom: Clone + 'static {
    type Element: Clone + PartialEq + fmt::Debug + 'static;

    // --- Lookup ---

    /// First element matching `selector` under `scope` (or the whole document).
    fn find(&self, scope: Option<&Self::Element>, selector: &Selector) -> Option<Self::Element>;

    /// Every element matching `selector` under `scope`, in document order.
    fn find_all(&self, scope: Option<&Self::Element>, selector: &Selector) -> Vec<Self::Element>;

    fn by_id(&self, id: &str) -> Option<Self::Element>;
    fn parent(&self, el: &Self::Element) -> Option<Self::Element>;
    fn children(&self, el: &Self::Element) -> Vec<Self::Element>;
    /// The document element (`<html>`). Present while the page is still loading.
    fn root(&self) -> Option<Self::Element>;
    fn head(&self) -> Option<Self::Element>;
    fn body(&self) -> Option<Self::Element>;

    // --- Reads ---

    /// Lowercase tag name.
    fn tag_name(&self, el: &Self::Element) -> String;
    fn text_content(&self, el: &Self::Element) -> String;
    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;

    /// Inline style property value, empty when not set.
    fn style(&self, el: &Self::Element, property: &str) -> String;

    fn value(&self, el: &Self::Element) -> String;
    fn checked(&self, el: &Self::Element) -> bool;
    fn title(&self) -> String;

    // --- Writes ---

    fn set_text_content(&self, el: &Self::Element, text: &str);
    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str) -> Result<(), TweakError>;

    /// Set an inline style property; an empty value removes the override.
    fn set_style(&self, el: &Self::Element, property: &str, value: &str) -> Result<(), TweakError>;

    fn set_value(&self, el: &Self::Element, value: &str);
    fn set_checked(&self, el: &Self::Element, checked: bool);
    fn set_title(&self, title: &str);

    // --- Structure ---

    fn create_element(&self, tag: &str) -> Result<Self::Element, TweakError>;
    fn create_svg_element(&self, tag: &str) -> Result<Self::Element, TweakError>;
    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), TweakError>;

    /// Insert `node` as the previous sibling of `reference`.
    fn insert_before(&self, node: &Self::Element, reference: &Self::Element) -> Result<(), TweakError>;

    // --- Subscriptions (held for the page's lifetime) ---

    fn listen(&self, el: &Self::Element, kind: Listen, handler: EventHandler);
    fn on_key_down(&self, handler: KeyHandler);

    /// Call `handler` whenever the document's element tree changes.
    fn watch(&self, handler: Box<dyn Fn()>);

    /// Call `handler` once the document has finished parsing (now, if it has).
    fn when_ready(&self, handler: Box<dyn FnOnce()>);
}

/// Closest inclusive ancestor of `el` with tag `tag`.
pub fn closest<D: Dom>(dom: &D, el: &D::Element, tag: &str) -> Option<D::Element> {
    let mut current = Some(el.clone());
    while let Some(node) = current {
        if dom.tag_name(&node) == tag {
            return Some(node);
        }
        current = dom.parent(&node);
    }
    None
}

/// First direct child of `el` with tag `tag` (`:scope > tag`).
pub fn child_by_tag<D: Dom>(dom: &D, el: &D::Element, tag: &str) -> Option<D::Element> {
    dom.children(el).into_iter().find(|child| dom.tag_name(child) == tag)
}

/// Set an inline style only if it differs from the current value.
///
/// Returns whether a write happened. `same` decides equality so colour
/// properties can compare semantically.
pub fn ensure_style<D: Dom>(
    dom: &D,
    el: &D::Element,
    property: &str,
    value: &str,
    same: fn(&str, &str) -> bool,
) -> Result<bool, TweakError> {
    if same(&dom.style(el, property), value) {
        return Ok(false);
    }
    dom.set_style(el, property, value)?;
    Ok(true)
}
