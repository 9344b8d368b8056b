//! UI tweaks for the TypingMind web app.
//!
//! This crate is compiled to WebAssembly and runs as a content script on the
//! host page. It hides clutter, recolours the workspace bar, overrides the
//! page title, and applies a custom font, all driven by preferences kept in
//! `localStorage` and edited through an injected settings panel. Every host
//! DOM mutation re-runs an idempotent reconciliation pass so the overrides
//! survive the host app's re-renders.
//!
//! Everything except [`dom::browser`] and the `start` entry point builds
//! natively and is tested against an in-memory document.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | [`app::Tweaks::install`]: wires the watch, key chord, and ready signal |
//! | [`reconcile`] | The reconciliation pass and its per-page session state |
//! | [`panel`] | Settings overlay: layout, DOM construction, edit handling |
//! | [`targets`] | One host-element lookup per rule |
//! | [`prefs`] | Preference registry and typed store |
//! | [`storage`] | Key-value backends (`localStorage`, in-memory) |
//! | [`dom`] | Document abstraction and its web-sys implementation |
//! | [`font`] | Derived custom-font stylesheet |
//! | [`color`] | Colour parsing and comparison |
//! | [`keys`] | Modifier keys, platform, and the panel chord |
//! | [`consts`] | Storage keys, selectors, element ids, defaults |
//! | [`error`] | [`error::TweakError`] |

pub mod app;
pub mod color;
pub mod consts;
pub mod dom;
pub mod error;
pub mod font;
pub mod keys;
pub mod panel;
pub mod prefs;
pub mod reconcile;
pub mod storage;
pub mod targets;

#[cfg(test)]
mod host_fixture;

#[cfg(feature = "browser")]
use wasm_bindgen::prelude::*;

/// WASM entry point: set up logging, pick a store, and install.
#[cfg(feature = "browser")]
#[wasm_bindgen(start)]
pub fn start() {
    use crate::consts::LOG_TARGET;
    use crate::storage::{LocalStorage, MemoryStore};

    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(err) = console_log::init_with_level(level) {
        log::warn!(target: LOG_TARGET, "console logger not installed: {err}");
    }

    let Some(dom) = dom::browser::BrowserDom::current() else {
        log::error!(target: LOG_TARGET, "no document; UI tweaks disabled");
        return;
    };
    let platform = keys::Platform::from_user_agent(&dom.user_agent());

    match LocalStorage::open() {
        Ok(store) => boot(dom, store, platform),
        Err(err) => {
            log::warn!(target: LOG_TARGET, "{err}; settings will only last for this page");
            boot(dom, MemoryStore::new(), platform);
        }
    }
}

#[cfg(feature = "browser")]
fn boot<S: storage::KeyValueStore + 'static>(dom: dom::browser::BrowserDom, store: S, platform: keys::Platform) {
    let installed = app::Tweaks::install(dom, store, platform).is_some();
    log::debug!(target: consts::LOG_TARGET, "startup finished (installed: {installed})");
}
