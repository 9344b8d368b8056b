//! TypingMind-shaped page used by the test suites.

use crate::dom::memory::{MemoryDom, NodeRef};

pub const HOST_TITLE: &str = "TypingMind";

/// Handles to the interesting host elements.
pub struct Host {
    pub dom: MemoryDom,
    pub bar: NodeRef,
    pub teams: NodeRef,
    pub kb: NodeRef,
    pub settings: NodeRef,
    pub sync: NodeRef,
    pub profile: NodeRef,
    pub logo_section: NodeRef,
    pub chat_profiles: NodeRef,
    pub pinned: NodeRef,
    pub new_chat: NodeRef,
    pub chat_space: NodeRef,
}

fn tab(dom: &MemoryDom, bar: NodeRef, id: &str, label: &str) -> NodeRef {
    let button = dom.add(bar, "button", &[("data-element-id", id), ("class", "tab-button")]);
    let outer = dom.add(button, "span", &[("class", "tab-outer")]);
    let icon = dom.add(outer, "div", &[("class", "tab-icon")]);
    dom.add(icon, "svg", &[]);
    dom.add_text(outer, "span", label);
    button
}

/// Build the full page.
pub fn host() -> Host {
    let dom = MemoryDom::new(HOST_TITLE);
    let body = dom.body_ref();

    let app = dom.add(body, "div", &[("id", "app")]);
    let bar = dom.add(app, "div", &[("data-element-id", "workspace-bar")]);
    let teams = tab(&dom, bar, "workspace-tab-teams", "Teams");
    let kb = dom.add(bar, "button", &[("class", "tab-button")]);
    let kb_outer = dom.add(kb, "span", &[]);
    dom.add(kb_outer, "svg", &[]);
    dom.add_text(kb_outer, "span", " KB ");
    let sync = tab(&dom, bar, "workspace-tab-cloudsync", "Sync");
    let settings = tab(&dom, bar, "workspace-tab-settings", "Settings");
    let profile = dom.add(bar, "button", &[("data-element-id", "workspace-profile-button"), ("class", "profile")]);

    let sidebar = dom.add(app, "div", &[("class", "sidebar")]);
    let logo_section = dom.add(sidebar, "div", &[("class", "logo-section")]);
    let logo_link = dom.add(logo_section, "a", &[]);
    dom.add(logo_link, "img", &[("alt", "TypingMind"), ("src", "/logo.png")]);
    let new_chat = dom.add(sidebar, "button", &[("data-element-id", "new-chat-button-in-side-bar")]);
    let chat_profiles = dom.add(sidebar, "button", &[]);
    let chat_profiles_inner = dom.add(chat_profiles, "div", &[]);
    dom.add_text(chat_profiles_inner, "span", "Chat Profiles");

    let chat_space = dom.add(app, "div", &[("data-element-id", "chat-space-background")]);
    let pinned = dom.add(chat_space, "div", &[("data-element-id", "pinned-characters-container")]);

    Host { dom, bar, teams, kb, settings, sync, profile, logo_section, chat_profiles, pinned, new_chat, chat_space }
}
