//! The reconciler: makes the host DOM match the stored preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! A pass runs on startup, on every host DOM mutation, and after every
//! settings panel write. Each rule resolves its target afresh (see
//! [`crate::targets`]), skips silently when the target is missing, and
//! writes only when the current value differs from the desired one.
//!
//! DESIGN
//! ======
//! A pass is a pure function of (preferences, host DOM). Running it twice in
//! a row performs no writes the second time, which is what keeps the
//! mutation observer from feeding itself: the only structural write a pass
//! can make is injecting the Tweaks button or the font `<style>` element, and
//! both are created once and found by id afterwards.

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod reconcile_test;

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use crate::color::same_color;
use crate::consts::*;
use crate::dom::{Dom, EventInfo, Listen, closest, ensure_style};
use crate::error::TweakError;
use crate::font::{FontPrefs, build_sheet};
use crate::prefs::{Pref, PrefStore};
use crate::storage::KeyValueStore;
use crate::targets;

type OpenHook = Rc<RefCell<Option<Rc<dyn Fn()>>>>;

/// Per-page state owned by the reconciler.
#[derive(Default)]
pub struct Session {
    /// Title the host set before any override, captured once.
    original_title: OnceCell<String>,
    /// What the injected button does when clicked; installed by the panel.
    open_panel: OpenHook,
    /// Last font URL reported as invalid, so the warning is not repeated every pass.
    rejected_font_url: RefCell<Option<String>>,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pass {
    /// DOM writes performed.
    pub writes: usize,
    /// The Tweaks button was created during this pass.
    pub injected: bool,
}

pub struct Reconciler<D: Dom, S: KeyValueStore> {
    dom: D,
    prefs: PrefStore<S>,
    session: Session,
}

impl<D: Dom, S: KeyValueStore> Reconciler<D, S> {
    pub fn new(dom: D, prefs: PrefStore<S>) -> Self {
        Self { dom, prefs, session: Session::default() }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn prefs(&self) -> &PrefStore<S> {
        &self.prefs
    }

    /// Install what clicking the injected Tweaks button does.
    pub fn set_open_handler(&self, handler: Rc<dyn Fn()>) {
        *self.session.open_panel.borrow_mut() = Some(handler);
    }

    /// The host's own title, once captured.
    #[cfg(test)]
    pub(crate) fn original_title(&self) -> Option<&str> {
        self.session.original_title.get().map(String::as_str)
    }

    /// Capture the host title and run the first pass.
    pub fn init(&self) -> Pass {
        self.capture_title();
        self.reconcile()
    }

    /// Apply every rule once.
    pub fn reconcile(&self) -> Pass {
        let mut pass = Pass::default();
        // The button goes first so the label colour rule sees it in the same pass.
        self.apply_tweaks_button(&mut pass);
        self.apply_visibility(&mut pass);
        self.apply_colors(&mut pass);
        self.apply_title(&mut pass);
        self.apply_font(&mut pass);
        if pass.writes > 0 {
            log::debug!(target: LOG_TARGET, "reconciled with {} writes", pass.writes);
        }
        pass
    }

    fn capture_title(&self) -> &str {
        self.session.original_title.get_or_init(|| self.dom.title())
    }

    // --- Primitive writes ---

    fn ensure(&self, el: &D::Element, property: &str, value: &str, pass: &mut Pass) {
        let same: fn(&str, &str) -> bool = if property.ends_with("color") { same_color } else { |a, b| a == b };
        match ensure_style(&self.dom, el, property, value, same) {
            Ok(true) => pass.writes += 1,
            Ok(false) => {}
            Err(err) => log::warn!(target: LOG_TARGET, "could not set {property}: {err}"),
        }
    }

    fn hide(&self, el: Option<D::Element>, hidden: bool, pass: &mut Pass) {
        if let Some(el) = el {
            self.ensure(&el, "display", if hidden { "none" } else { "" }, pass);
        }
    }

    // --- Rules ---

    fn apply_visibility(&self, pass: &mut Pass) {
        let dom = &self.dom;
        let bar = targets::workspace_bar(dom);

        self.hide(targets::teams_tab(dom), self.prefs.flag(Pref::HideTeams), pass);
        if let Some(bar) = &bar {
            let hide_kb = self.prefs.flag(Pref::HideKb);
            for tab in targets::kb_tabs(dom, bar) {
                self.hide(Some(tab), hide_kb, pass);
            }
        }
        self.hide(targets::logo_section(dom), self.prefs.flag(Pref::HideLogo), pass);
        self.hide(targets::profile_button(dom), self.prefs.flag(Pref::HideProfile), pass);
        let hide_chat_profiles = self.prefs.flag(Pref::HideChatProfiles);
        for button in targets::chat_profiles_buttons(dom) {
            self.hide(Some(button), hide_chat_profiles, pass);
        }
        self.hide(targets::pinned_characters(dom), self.prefs.flag(Pref::HidePinnedCharacters), pass);
    }

    fn apply_colors(&self, pass: &mut Pass) {
        let dom = &self.dom;
        if let Some(button) = targets::new_chat_button(dom) {
            let color = self.prefs.color(Pref::NewChatButtonColor).unwrap_or_default();
            self.ensure(&button, "background-color", &color, pass);
        }

        let Some(bar) = targets::workspace_bar(dom) else {
            return;
        };
        let icon_color = self.prefs.color(Pref::WorkspaceIconColor).unwrap_or_default();
        let own_button = targets::tweaks_button(dom);
        for icon in targets::bar_icons(dom, &bar) {
            // The injected button's icon has its own fallback colour.
            if own_button.is_some() && closest(dom, &icon, "button") == own_button {
                continue;
            }
            self.ensure(&icon, "color", &icon_color, pass);
        }
        let font_color = self.prefs.color(Pref::WorkspaceFontColor).unwrap_or_default();
        for label in targets::bar_labels(dom, &bar) {
            self.ensure(&label, "color", &font_color, pass);
        }
    }

    fn apply_title(&self, pass: &mut Pass) {
        let original = self.capture_title().to_owned();
        let desired = self.prefs.text(Pref::PageTitle).unwrap_or(original);
        if self.dom.title() != desired {
            self.dom.set_title(&desired);
            pass.writes += 1;
        }
    }

    fn apply_font(&self, pass: &mut Pass) {
        let sheet = build_sheet(&FontPrefs {
            url: self.prefs.text(Pref::FontUrl),
            family: self.prefs.text(Pref::FontFamily),
            weight: self.prefs.font_weight(),
            style: self.prefs.font_style(),
        });

        let mut last_rejected = self.session.rejected_font_url.borrow_mut();
        if sheet.rejected_url != *last_rejected {
            if let Some(url) = &sheet.rejected_url {
                log::warn!(target: LOG_TARGET, "invalid custom font URL (must be http or https): {url}");
            }
            last_rejected.clone_from(&sheet.rejected_url);
        }
        drop(last_rejected);

        let element = match self.font_style_element(pass) {
            Ok(Some(element)) => element,
            Ok(None) => return,
            Err(err) => {
                log::warn!(target: LOG_TARGET, "could not create font stylesheet: {err}");
                return;
            }
        };
        if self.dom.text_content(&element) != sheet.css {
            self.dom.set_text_content(&element, &sheet.css);
            pass.writes += 1;
        }
    }

    /// The single font `<style>` element, created in `<head>` on first use.
    fn font_style_element(&self, pass: &mut Pass) -> Result<Option<D::Element>, TweakError> {
        if let Some(existing) = self.dom.by_id(FONT_STYLE_ELEMENT_ID) {
            return Ok(Some(existing));
        }
        let Some(head) = self.dom.head() else {
            return Ok(None);
        };
        let element = self.dom.create_element("style")?;
        self.dom.set_attribute(&element, "id", FONT_STYLE_ELEMENT_ID)?;
        self.dom.append_child(&head, &element)?;
        pass.writes += 1;
        Ok(Some(element))
    }

    fn apply_tweaks_button(&self, pass: &mut Pass) {
        let dom = &self.dom;
        let Some(bar) = targets::workspace_bar(dom) else {
            return;
        };
        let button = match targets::tweaks_button(dom) {
            Some(button) => button,
            None => match self.inject_tweaks_button(&bar) {
                Ok(Some(button)) => {
                    pass.injected = true;
                    pass.writes += 1;
                    button
                }
                Ok(None) => return,
                Err(err) => {
                    log::warn!(target: LOG_TARGET, "could not insert Tweaks button: {err}");
                    return;
                }
            },
        };

        if let Some(icon) = dom.find(Some(&button), &SVG) {
            let color = self.prefs.color(Pref::WorkspaceIconColor);
            self.ensure(&icon, "color", color.as_deref().unwrap_or(WORKSPACE_ICON_COLOR_VISUAL), pass);
        }
        let display = if self.prefs.flag(Pref::ShowTweaksButton) { "inline-flex" } else { "none" };
        self.ensure(&button, "display", display, pass);
    }

    /// Build the Tweaks button from the style reference and insert it before
    /// the settings tab. `Ok(None)` when either anchor is missing.
    fn inject_tweaks_button(&self, bar: &D::Element) -> Result<Option<D::Element>, TweakError> {
        let dom = &self.dom;
        let (Some(settings), Some(reference)) = (targets::settings_tab(dom, bar), targets::style_reference(dom, bar))
        else {
            return Ok(None);
        };
        let classes = targets::button_classes(dom, &reference);

        let button = dom.create_element("button")?;
        dom.set_attribute(&button, "id", TWEAKS_BUTTON_ID)?;
        dom.set_attribute(&button, "data-element-id", TWEAKS_BUTTON_ID)?;
        dom.set_attribute(&button, "title", TWEAKS_BUTTON_TITLE)?;
        dom.set_attribute(&button, "class", &classes.button)?;

        let outer = dom.create_element("span")?;
        if let Some(class) = &classes.outer_span {
            dom.set_attribute(&outer, "class", class)?;
        }

        let icon_box = dom.create_element("div")?;
        if let Some(class) = &classes.icon_div {
            dom.set_attribute(&icon_box, "class", class)?;
        }
        dom.set_style(&icon_box, "position", "relative")?;
        dom.set_style(&icon_box, "display", "flex")?;
        dom.set_style(&icon_box, "justify-content", "center")?;
        dom.set_style(&icon_box, "align-items", "center")?;

        let icon = dom.create_svg_element("svg")?;
        for (name, value) in [
            ("class", TWEAKS_ICON_CLASS),
            ("width", "18px"),
            ("height", "18px"),
            ("viewBox", "0 0 24 24"),
            ("fill", "currentColor"),
        ] {
            dom.set_attribute(&icon, name, value)?;
        }
        let path = dom.create_svg_element("path")?;
        dom.set_attribute(&path, "d", TWEAKS_ICON_PATH)?;
        dom.append_child(&icon, &path)?;
        dom.append_child(&icon_box, &icon)?;

        let label = dom.create_element("span")?;
        dom.set_attribute(&label, "class", TWEAKS_LABEL_CLASS)?;
        dom.set_text_content(&label, TWEAKS_BUTTON_LABEL);

        dom.append_child(&outer, &icon_box)?;
        dom.append_child(&outer, &label)?;
        dom.append_child(&button, &outer)?;

        let open_panel = Rc::clone(&self.session.open_panel);
        dom.listen(
            &button,
            Listen::ExclusiveClick,
            Box::new(move |_: &EventInfo| {
                let handler = open_panel.borrow().clone();
                match handler {
                    Some(open) => open(),
                    None => log::warn!(target: LOG_TARGET, "settings panel is not available"),
                }
            }),
        );

        dom.insert_before(&button, &settings)?;
        log::debug!(target: LOG_TARGET, "inserted Tweaks button");
        Ok(Some(button))
    }
}
