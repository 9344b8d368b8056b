//! DOM construction for the settings overlay.
//!
//! The overlay is built once, appended to `<body>`, and then only shown,
//! hidden, and refreshed. Every control reports edits through a single
//! `on_edit` callback so the view holds no preference logic.

use std::rc::Rc;

use super::fields::{Block, Edit, LAYOUT, control_id, event_for, placeholder, reset_label};
use super::styles::PANEL_CSS;
use crate::consts::*;
use crate::dom::{Dom, EventInfo, Listen};
use crate::error::TweakError;
use crate::prefs::{Pref, PrefKind};

pub type EditHandler = Rc<dyn Fn(Pref, Edit)>;
pub type CloseHandler = Rc<dyn Fn()>;

/// Handles to the built overlay.
#[derive(Clone)]
pub struct PanelView<D: Dom> {
    pub overlay: D::Element,
    pub feedback: D::Element,
    controls: Vec<(Pref, D::Element)>,
}

impl<D: Dom> PanelView<D> {
    /// The input or select bound to `pref`.
    pub fn control(&self, pref: Pref) -> Option<&D::Element> {
        self.controls.iter().find(|(p, _)| *p == pref).map(|(_, el)| el)
    }

    pub fn controls(&self) -> impl Iterator<Item = &(Pref, D::Element)> {
        self.controls.iter()
    }
}

struct Builder<'a, D: Dom> {
    dom: &'a D,
    on_edit: EditHandler,
    controls: Vec<(Pref, D::Element)>,
}

/// Build the overlay and attach it to the document.
///
/// # Errors
///
/// Returns [`TweakError::Dom`] if the document has no `<body>`, if an
/// overlay is already present, or if any DOM call fails.
pub fn build<D: Dom>(dom: &D, on_edit: EditHandler, on_close: CloseHandler) -> Result<PanelView<D>, TweakError> {
    if dom.by_id(OVERLAY_ID).is_some() {
        return Err(TweakError::Dom("settings panel already exists".to_owned()));
    }
    let body = dom.body().ok_or_else(|| TweakError::Dom("document has no <body>".to_owned()))?;
    ensure_panel_styles(dom)?;

    let mut builder = Builder { dom, on_edit, controls: Vec::new() };

    let overlay = builder.element("div", None)?;
    dom.set_attribute(&overlay, "id", OVERLAY_ID)?;
    let close = Rc::clone(&on_close);
    dom.listen(
        &overlay,
        Listen::Click,
        Box::new(move |info: &EventInfo| {
            if info.on_self {
                close();
            }
        }),
    );

    let modal = builder.element("div", None)?;
    dom.set_attribute(&modal, "id", MODAL_ID)?;
    builder.text("h2", PANEL_HEADING, &modal)?;
    let feedback = builder.text("p", "", &modal)?;
    dom.set_attribute(&feedback, "id", FEEDBACK_ID)?;

    let scroll = builder.element("div", None)?;
    dom.set_attribute(&scroll, "id", SCROLL_ID)?;
    for block in LAYOUT {
        builder.block(block, &scroll)?;
    }
    dom.append_child(&modal, &scroll)?;

    let footer = builder.element("div", Some("tweak-modal-footer"))?;
    let close_button = builder.text("button", "Close", &footer)?;
    dom.set_attribute(&close_button, "id", CLOSE_BUTTON_ID)?;
    dom.set_attribute(&close_button, "type", "button")?;
    dom.listen(&close_button, Listen::Click, Box::new(move |_: &EventInfo| on_close()));
    dom.append_child(&modal, &footer)?;

    dom.append_child(&overlay, &modal)?;
    dom.append_child(&body, &overlay)?;
    log::debug!(target: LOG_TARGET, "settings panel built with {} controls", builder.controls.len());

    Ok(PanelView { overlay, feedback, controls: builder.controls })
}

/// Add the panel stylesheet to `<head>` unless it is already there.
fn ensure_panel_styles<D: Dom>(dom: &D) -> Result<(), TweakError> {
    if dom.by_id(PANEL_STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let head = dom.head().ok_or_else(|| TweakError::Dom("document has no <head>".to_owned()))?;
    let style = dom.create_element("style")?;
    dom.set_attribute(&style, "id", PANEL_STYLE_ELEMENT_ID)?;
    dom.set_text_content(&style, PANEL_CSS);
    dom.append_child(&head, &style)
}

impl<D: Dom> Builder<'_, D> {
    fn element(&self, tag: &str, class: Option<&str>) -> Result<D::Element, TweakError> {
        let el = self.dom.create_element(tag)?;
        if let Some(class) = class {
            self.dom.set_attribute(&el, "class", class)?;
        }
        Ok(el)
    }

    /// Append a `tag` element holding `text` to `parent`.
    fn text(&self, tag: &str, text: &str, parent: &D::Element) -> Result<D::Element, TweakError> {
        let el = self.dom.create_element(tag)?;
        self.dom.set_text_content(&el, text);
        self.dom.append_child(parent, &el)?;
        Ok(el)
    }

    fn block(&mut self, block: &Block, parent: &D::Element) -> Result<(), TweakError> {
        match *block {
            Block::Toggles(prefs) => {
                let section = self.element("div", Some("tweak-settings-section"))?;
                let list = self.element("div", None)?;
                for pref in prefs {
                    self.checkbox(*pref, &list)?;
                }
                self.dom.append_child(&section, &list)?;
                self.dom.append_child(parent, &section)
            }
            Block::Row(pref) => self.row(pref, parent),
            Block::Divider => {
                let divider = self.element("hr", Some("tweak-divider"))?;
                self.dom.append_child(parent, &divider)
            }
            Block::Group { intro, rows } => {
                let section = self.element("div", Some("tweak-settings-section"))?;
                let intro = self.text("p", intro, &section)?;
                self.dom.set_attribute(&intro, "class", "tweak-font-intro")?;
                for pref in rows {
                    self.row(*pref, &section)?;
                }
                self.dom.append_child(parent, &section)
            }
        }
    }

    fn checkbox(&mut self, pref: Pref, parent: &D::Element) -> Result<(), TweakError> {
        let id = control_id(pref);
        let item = self.element("div", Some("tweak-checkbox-item"))?;
        let input = self.element("input", None)?;
        self.dom.set_attribute(&input, "type", "checkbox")?;
        self.dom.set_attribute(&input, "id", &id)?;
        self.dom.set_attribute(&input, "name", &id)?;
        self.bind(pref, &input);
        self.dom.append_child(&item, &input)?;

        let label = self.text("label", pref.label(), &item)?;
        self.dom.set_attribute(&label, "for", &id)?;
        self.dom.append_child(parent, &item)
    }

    /// Label, control, and reset button for a non-flag preference.
    fn row(&mut self, pref: Pref, parent: &D::Element) -> Result<(), TweakError> {
        let kind = pref.kind();
        let (row_class, wrapper_class) = match kind {
            PrefKind::Color { .. } => ("tweak-color-item", "tweak-color-input-wrapper"),
            _ => ("tweak-text-item", "tweak-text-input-wrapper"),
        };
        let id = control_id(pref);
        let row = self.element("div", Some(row_class))?;
        let label = self.text("label", pref.label(), &row)?;
        self.dom.set_attribute(&label, "for", &id)?;

        let wrapper = self.element("div", Some(wrapper_class))?;
        let control = match kind {
            PrefKind::Choice => {
                let select = self.element("select", None)?;
                for option in pref.options() {
                    let el = self.text("option", &option, &select)?;
                    self.dom.set_attribute(&el, "value", &option)?;
                }
                select
            }
            PrefKind::Color { .. } => {
                let input = self.element("input", None)?;
                self.dom.set_attribute(&input, "type", "color")?;
                input
            }
            PrefKind::Flag { .. } | PrefKind::Title | PrefKind::Text { .. } => {
                let input = self.element("input", None)?;
                self.dom.set_attribute(&input, "type", "text")?;
                if let Some(text) = placeholder(pref) {
                    self.dom.set_attribute(&input, "placeholder", text)?;
                }
                input
            }
        };
        self.dom.set_attribute(&control, "id", &id)?;
        self.bind(pref, &control);
        self.dom.append_child(&wrapper, &control)?;

        if let (Some(caption), Some(reset)) = (reset_label(kind), Edit::reset_for(kind)) {
            let button = self.text("button", caption, &wrapper)?;
            self.dom.set_attribute(&button, "class", "tweak-reset-button")?;
            self.dom.set_attribute(&button, "type", "button")?;
            let on_edit = Rc::clone(&self.on_edit);
            self.dom.listen(&button, Listen::Click, Box::new(move |_: &EventInfo| on_edit(pref, reset.clone())));
        }

        self.dom.append_child(&row, &wrapper)?;
        self.dom.append_child(parent, &row)
    }

    /// Forward the control's edit events and remember it for refreshes.
    fn bind(&mut self, pref: Pref, control: &D::Element) {
        let kind = pref.kind();
        let on_edit = Rc::clone(&self.on_edit);
        self.dom.listen(
            control,
            event_for(kind),
            Box::new(move |info: &EventInfo| on_edit(pref, Edit::from_event(kind, info))),
        );
        self.controls.push((pref, control.clone()));
    }
}
