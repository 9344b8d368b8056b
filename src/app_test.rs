use super::*;
use crate::consts::*;
use crate::dom::memory::MemoryDom;
use crate::host_fixture::{Host, host};
use crate::keys::Modifiers;
use crate::prefs::Pref;
use crate::storage::MemoryStore;

fn install(h: &Host, store: &MemoryStore, platform: Platform) -> Tweaks<MemoryDom, MemoryStore> {
    Tweaks::install(h.dom.clone(), store.clone(), platform).expect("installed")
}

fn chord(platform: Platform) -> KeyPress {
    let modifiers = match platform {
        Platform::Mac => Modifiers { shift: true, meta: true, ..Modifiers::default() },
        Platform::Other => Modifiers { shift: true, alt: true, ..Modifiers::default() },
    };
    KeyPress::new("T", modifiers)
}

// =============================================================
// Startup
// =============================================================

#[test]
fn install_applies_stored_preferences() {
    let h = host();
    let store = MemoryStore::new();
    PrefStore::new(store.clone()).set_flag(Pref::HideTeams, true).unwrap();

    let tweaks = install(&h, &store, Platform::Other);
    assert_eq!(h.dom.style(&h.teams, "display"), "none");
    assert_eq!(h.dom.count_id(TWEAKS_BUTTON_ID), 1);
    assert_eq!(h.dom.count_id(OVERLAY_ID), 1);
    assert!(!tweaks.panel().is_open());
}

#[test]
fn second_install_is_refused() {
    let h = host();
    let store = MemoryStore::new();
    let _first = install(&h, &store, Platform::Other);
    assert!(Tweaks::install(h.dom.clone(), store, Platform::Other).is_none());
    assert_eq!(h.dom.count_id(TWEAKS_BUTTON_ID), 1);
}

#[test]
fn second_install_while_loading_is_refused() {
    let dom = MemoryDom::loading("TypingMind");
    let store = MemoryStore::new();
    let first = Tweaks::install(dom.clone(), store.clone(), Platform::Other);
    let second = Tweaks::install(dom.clone(), store, Platform::Other);
    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(dom.count_id(OVERLAY_ID), 0);

    dom.finish_loading();
    assert_eq!(dom.key_handler_count(), 1);
    assert_eq!(dom.watcher_count(), 1);
    assert_eq!(dom.count_id(OVERLAY_ID), 1);
}

#[test]
fn install_marks_the_page() {
    let h = host();
    let _tweaks = install(&h, &MemoryStore::new(), Platform::Other);
    let root = h.dom.root().expect("root");
    assert!(h.dom.attribute(&root, INSTALLED_MARKER_ATTR).is_some());
}

#[test]
fn ready_work_waits_for_loading_to_finish() {
    let dom = MemoryDom::loading("TypingMind");
    let store = MemoryStore::new();
    PrefStore::new(store.clone()).set_text(Pref::PageTitle, "Mine").unwrap();
    let _tweaks = Tweaks::install(dom.clone(), store, Platform::Other).expect("installed");
    assert_eq!(dom.title(), "TypingMind");
    assert_eq!(dom.watcher_count(), 0);

    dom.finish_loading();
    assert_eq!(dom.title(), "Mine");
}

#[test]
fn preferences_survive_a_reload() {
    let store = MemoryStore::new();
    let first = host();
    let tweaks = install(&first, &store, Platform::Other);
    tweaks.panel().apply(Pref::PageTitle, crate::panel::Edit::Text("Saved".to_owned()));

    let second = host();
    let _reloaded = install(&second, &store, Platform::Other);
    assert_eq!(second.dom.title(), "Saved");
}

// =============================================================
// Mutation watch
// =============================================================

#[test]
fn host_rerender_triggers_a_pass() {
    let h = host();
    let store = MemoryStore::new();
    PrefStore::new(store.clone()).set_flag(Pref::HidePinnedCharacters, true).unwrap();
    let _tweaks = install(&h, &store, Platform::Other);

    h.dom.remove(h.pinned);
    let fresh = h.dom.add(h.chat_space, "div", &[("data-element-id", "pinned-characters-container")]);
    assert_eq!(h.dom.style(&fresh, "display"), "");
    h.dom.notify_mutation();
    assert_eq!(h.dom.style(&fresh, "display"), "none");
}

#[test]
fn repeated_notifications_converge() {
    let h = host();
    let store = MemoryStore::new();
    let _tweaks = install(&h, &store, Platform::Other);
    h.dom.notify_mutation();
    let settled = h.dom.writes();
    for _ in 0..10 {
        h.dom.notify_mutation();
    }
    assert_eq!(h.dom.writes(), settled);
    assert_eq!(h.dom.count_id(TWEAKS_BUTTON_ID), 1);
}

// =============================================================
// Opening the panel
// =============================================================

#[test]
fn chord_toggles_panel() {
    let h = host();
    let tweaks = install(&h, &MemoryStore::new(), Platform::Other);
    assert!(h.dom.press(&chord(Platform::Other)));
    assert!(tweaks.panel().is_open());
    assert!(h.dom.press(&KeyPress::new("t", chord(Platform::Other).modifiers)));
    assert!(!tweaks.panel().is_open());
}

#[test]
fn other_keys_pass_through() {
    let h = host();
    let tweaks = install(&h, &MemoryStore::new(), Platform::Other);
    assert!(!h.dom.press(&chord(Platform::Mac)));
    assert!(!h.dom.press(&KeyPress::new("T", Modifiers { alt: true, ..Modifiers::default() })));
    assert!(!h.dom.press(&KeyPress::new("Y", chord(Platform::Other).modifiers)));
    assert!(!tweaks.panel().is_open());
}

#[test]
fn mac_chord_uses_command() {
    let h = host();
    let tweaks = install(&h, &MemoryStore::new(), Platform::Mac);
    assert!(!h.dom.press(&chord(Platform::Other)));
    assert!(h.dom.press(&chord(Platform::Mac)));
    assert!(tweaks.panel().is_open());
}

#[test]
fn tweaks_button_opens_panel() {
    let h = host();
    let tweaks = install(&h, &MemoryStore::new(), Platform::Other);
    h.dom.click(h.dom.by_id(TWEAKS_BUTTON_ID).expect("button"));
    assert!(tweaks.panel().is_open());
    assert_eq!(h.dom.style(&h.dom.by_id(OVERLAY_ID).expect("overlay"), "display"), "flex");
}
