//! The settings panel: an overlay form that edits every preference.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opened by the keyboard chord or the injected Tweaks button, closed by
//! the Close button, a backdrop click, or the chord again. There is no save
//! step: each control event writes its preference immediately, reports
//! the outcome in the feedback line, and runs a reconciliation pass so the
//! page reflects the change at once.
//!
//! DESIGN
//! ======
//! [`Panel`] owns the open/closed state and the built view; [`view`] only
//! constructs DOM and forwards events as [`Edit`]s. Controls hold a weak
//! reference back to the panel so the panel, the reconciler's open hook,
//! and the DOM listeners do not keep each other alive in a cycle.
//!
//! Opening always reloads every control from the store first, so the panel
//! never shows values that were changed elsewhere while it was closed.

mod fields;
mod styles;
mod view;


use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[cfg(test)]
pub(crate) use fields::laid_out_prefs;
pub use fields::{Edit, control_id};
pub use view::PanelView;

use crate::consts::{FEEDBACK_ERROR, FEEDBACK_SAVED, LOG_TARGET};
use crate::dom::Dom;
use crate::error::TweakError;
use crate::prefs::{Pref, PrefKind};
use crate::reconcile::Reconciler;
use crate::storage::KeyValueStore;

/// Status line under the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Clear,
    Saved,
    Failed,
}

impl Feedback {
    pub fn text(self) -> &'static str {
        match self {
            Self::Clear => "",
            Self::Saved => FEEDBACK_SAVED,
            Self::Failed => FEEDBACK_ERROR,
        }
    }
}

pub struct Panel<D: Dom, S: KeyValueStore> {
    reconciler: Rc<Reconciler<D, S>>,
    view: RefCell<Option<PanelView<D>>>,
    open: Cell<bool>,
}

impl<D: Dom, S: KeyValueStore + 'static> Panel<D, S> {
    pub fn new(reconciler: Rc<Reconciler<D, S>>) -> Rc<Self> {
        Rc::new(Self { reconciler, view: RefCell::new(None), open: Cell::new(false) })
    }

    pub fn reconciler(&self) -> &Rc<Reconciler<D, S>> {
        &self.reconciler
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// The built view, if [`Panel::build`] has succeeded.
    pub fn view(&self) -> Option<PanelView<D>> {
        self.view.borrow().clone()
    }

    /// Build the overlay unless it already exists. Returns whether the panel is usable.
    pub fn build(self: &Rc<Self>) -> bool {
        self.ensure_view().is_some()
    }

    fn ensure_view(self: &Rc<Self>) -> Option<PanelView<D>> {
        if let Some(view) = self.view.borrow().as_ref() {
            return Some(view.clone());
        }
        let edit_target = Rc::downgrade(self);
        let close_target = Rc::downgrade(self);
        let built = view::build(
            self.reconciler.dom(),
            Rc::new(move |pref: Pref, edit: Edit| {
                if let Some(panel) = edit_target.upgrade() {
                    panel.apply(pref, edit);
                }
            }),
            Rc::new(move || {
                if let Some(panel) = close_target.upgrade() {
                    panel.close();
                }
            }),
        );
        match built {
            Ok(view) => {
                *self.view.borrow_mut() = Some(view.clone());
                Some(view)
            }
            Err(err) => {
                log::error!(target: LOG_TARGET, "could not build settings panel: {err}");
                None
            }
        }
    }

    /// Reload every control, clear the feedback line, and show the overlay.
    pub fn open(self: &Rc<Self>) {
        let Some(view) = self.ensure_view() else {
            return;
        };
        self.refresh(&view);
        self.show_feedback(&view, Feedback::Clear);
        self.set_overlay_display(&view, "flex");
        self.open.set(true);
    }

    pub fn close(&self) {
        let Some(view) = self.view() else {
            log::warn!(target: LOG_TARGET, "settings panel has not been built");
            return;
        };
        self.set_overlay_display(&view, "none");
        self.open.set(false);
    }

    pub fn toggle(self: &Rc<Self>) {
        if self.is_open() { self.close() } else { self.open() }
    }

    /// Write one edit, report the outcome, and reconcile the page.
    pub fn apply(&self, pref: Pref, edit: Edit) {
        let result = self.write(pref, &edit);
        let view = self.view();

        if let (Some(view), Some(shown)) = (&view, edit.reset_display(pref.kind())) {
            if let Some(control) = view.control(pref) {
                self.reconciler.dom().set_value(control, shown);
            }
        }

        let feedback = match result {
            Ok(()) => {
                log::debug!(target: LOG_TARGET, "saved {pref}");
                self.reconciler.reconcile();
                Feedback::Saved
            }
            Err(err) => {
                log::error!(target: LOG_TARGET, "error saving {pref}: {err}");
                Feedback::Failed
            }
        };
        if let Some(view) = &view {
            self.show_feedback(view, feedback);
        }
    }

    fn write(&self, pref: Pref, edit: &Edit) -> Result<(), TweakError> {
        let prefs = self.reconciler.prefs();
        match edit {
            Edit::Checked(checked) => prefs.set_flag(pref, *checked),
            Edit::Color(color) => prefs.set_color(pref, Some(color.as_str())),
            Edit::ResetColor => prefs.set_color(pref, None),
            Edit::Text(text) => prefs.set_text(pref, text),
            Edit::ClearText => prefs.set_text(pref, ""),
            Edit::Choose(choice) => prefs.set_choice(pref, choice),
            Edit::ResetChoice => prefs.reset(pref),
        }
    }

    /// Load every control from the preference store.
    fn refresh(&self, view: &PanelView<D>) {
        let dom = self.reconciler.dom();
        let prefs = self.reconciler.prefs();
        for (pref, control) in view.controls() {
            match pref.kind() {
                PrefKind::Flag { .. } => dom.set_checked(control, prefs.flag(*pref)),
                PrefKind::Color { .. } => dom.set_value(control, &prefs.color_or_visual(*pref)),
                PrefKind::Title | PrefKind::Text { .. } => {
                    dom.set_value(control, &prefs.text(*pref).unwrap_or_default());
                }
                PrefKind::Choice => dom.set_value(control, &prefs.choice_or_default(*pref)),
            }
        }
    }

    fn show_feedback(&self, view: &PanelView<D>, feedback: Feedback) {
        self.reconciler.dom().set_text_content(&view.feedback, feedback.text());
    }

    fn set_overlay_display(&self, view: &PanelView<D>, display: &str) {
        if let Err(err) = self.reconciler.dom().set_style(&view.overlay, "display", display) {
            log::warn!(target: LOG_TARGET, "could not change panel visibility: {err}");
        }
    }
}
