use super::*;

fn shift_alt() -> Modifiers {
    Modifiers { shift: true, alt: true, ..Default::default() }
}

fn shift_meta() -> Modifiers {
    Modifiers { shift: true, meta: true, ..Default::default() }
}

// =============================================================
// Platform
// =============================================================

#[test]
fn user_agent_with_mac_is_mac() {
    let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15";
    assert_eq!(Platform::from_user_agent(ua), Platform::Mac);
}

#[test]
fn other_user_agents_are_other() {
    let ua = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/128.0";
    assert_eq!(Platform::from_user_agent(ua), Platform::Other);
    assert_eq!(Platform::from_user_agent(""), Platform::Other);
}

// =============================================================
// Chord
// =============================================================

#[test]
fn shift_alt_t_toggles_off_mac() {
    assert!(is_panel_chord(&KeyPress::new("T", shift_alt()), Platform::Other));
    assert!(is_panel_chord(&KeyPress::new("t", shift_alt()), Platform::Other));
}

#[test]
fn shift_meta_t_toggles_on_mac() {
    assert!(is_panel_chord(&KeyPress::new("T", shift_meta()), Platform::Mac));
    assert!(!is_panel_chord(&KeyPress::new("T", shift_alt()), Platform::Mac));
}

#[test]
fn chord_requires_shift() {
    let alt_only = Modifiers { alt: true, ..Default::default() };
    assert!(!is_panel_chord(&KeyPress::new("T", alt_only), Platform::Other));
}

#[test]
fn chord_requires_the_letter() {
    assert!(!is_panel_chord(&KeyPress::new("Y", shift_alt()), Platform::Other));
    assert!(!is_panel_chord(&KeyPress::new("Tab", shift_alt()), Platform::Other));
}

#[test]
fn chord_labels_name_the_modifier() {
    assert_eq!(Platform::Mac.chord_label(), "Shift+Cmd+T");
    assert_eq!(Platform::Other.chord_label(), "Shift+Alt+T");
}
