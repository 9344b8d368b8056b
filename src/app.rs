//! Startup wiring: one call connects the reconciler and the panel to the page.
//!
//! [`Tweaks::install`] first claims the page with a marker on `<html>`, then
//! registers, in order:
//! - the Tweaks button's open hook (weak, so the reconciler does not own the panel),
//! - a document key handler for the panel chord,
//! - a ready callback that builds the panel, runs the first pass, and only
//!   then subscribes to DOM mutations so every later host change re-runs a pass.
//!
//! The subscriptions live for the rest of the page; nothing is torn down.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::rc::Rc;

use crate::consts::{INSTALLED_MARKER_ATTR, LOG_TARGET, OVERLAY_ID};
use crate::dom::Dom;
use crate::keys::{KeyPress, Platform, is_panel_chord};
use crate::panel::Panel;
use crate::prefs::PrefStore;
use crate::reconcile::Reconciler;
use crate::storage::KeyValueStore;

/// Handles to an installed instance.
pub struct Tweaks<D: Dom, S: KeyValueStore> {
    reconciler: Rc<Reconciler<D, S>>,
    panel: Rc<Panel<D, S>>,
}

impl<D: Dom, S: KeyValueStore + 'static> Tweaks<D, S> {
    /// Install on `dom`, persisting through `store`.
    ///
    /// Returns `None` when the page already carries a settings panel, which
    /// means another instance is running.
    pub fn install(dom: D, store: S, platform: Platform) -> Option<Self> {
        if !claim_page(&dom) {
            log::warn!(target: LOG_TARGET, "UI tweaks already installed on this page");
            return None;
        }

        let reconciler = Rc::new(Reconciler::new(dom.clone(), PrefStore::new(store)));
        let panel = Panel::new(Rc::clone(&reconciler));

        let open_target = Rc::downgrade(&panel);
        reconciler.set_open_handler(Rc::new(move || {
            if let Some(panel) = open_target.upgrade() {
                panel.open();
            }
        }));

        let chord_panel = Rc::clone(&panel);
        dom.on_key_down(Box::new(move |press: &KeyPress| {
            if !is_panel_chord(press, platform) {
                return false;
            }
            chord_panel.toggle();
            true
        }));

        let ready_reconciler = Rc::clone(&reconciler);
        let ready_panel = Rc::clone(&panel);
        let watch_dom = dom.clone();
        dom.when_ready(Box::new(move || {
            ready_panel.build();
            ready_reconciler.init();
            let watcher = Rc::clone(&ready_reconciler);
            watch_dom.watch(Box::new(move || {
                watcher.reconcile();
            }));
        }));

        log::info!(target: LOG_TARGET, "UI tweaks loaded; press {} to open settings", platform.chord_label());
        Some(Self { reconciler, panel })
    }

    pub fn reconciler(&self) -> &Rc<Reconciler<D, S>> {
        &self.reconciler
    }

    pub fn panel(&self) -> &Rc<Panel<D, S>> {
        &self.panel
    }
}

/// Mark the page as taken. Returns `false` if another instance got there first.
///
/// The marker goes on `<html>` synchronously, so an install made while the
/// page is still loading is seen by the next one. A page without a
/// document element can only be checked through the overlay.
fn claim_page<D: Dom>(dom: &D) -> bool {
    if dom.by_id(OVERLAY_ID).is_some() {
        return false;
    }
    let Some(root) = dom.root() else {
        return true;
    };
    if dom.attribute(&root, INSTALLED_MARKER_ATTR).is_some() {
        return false;
    }
    if let Err(err) = dom.set_attribute(&root, INSTALLED_MARKER_ATTR, env!("CARGO_PKG_VERSION")) {
        log::warn!(target: LOG_TARGET, "install marker not set: {err}");
    }
    true
}
