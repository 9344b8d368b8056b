//! [`Dom`] backed by the live page through web-sys.
//!
//! This module is the only place that touches `web_sys::Document`. Fallible
//! JS calls are converted into [`TweakError::Dom`] or, for lookups, into
//! "not found" with a debug log.
//!
//! Listener and observer closures are leaked with `Closure::forget`: they are
//! registered once and must live as long as the page.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CssStyleDeclaration, Document, Element, Event, HtmlElement, HtmlInputElement,
    HtmlSelectElement, KeyboardEvent, MutationObserver, MutationObserverInit, SvgElement,
};

use super::{Dom, EventHandler, EventInfo, KeyHandler, Listen, Selector};
use crate::consts::LOG_TARGET;
use crate::error::TweakError;
use crate::keys::{KeyPress, Modifiers};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Best human-readable description of a thrown JS value.
pub fn js_reason(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{err:?}")
}

fn dom_err(err: JsValue) -> TweakError {
    TweakError::Dom(js_reason(&err))
}

/// The current page's document.
#[derive(Clone, Debug)]
pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    /// Bind to `window.document`, if there is one.
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    /// `navigator.userAgent`, or empty when unavailable.
    pub fn user_agent(&self) -> String {
        let Some(window) = web_sys::window() else {
            return String::new();
        };
        match window.navigator().user_agent() {
            Ok(agent) => agent,
            Err(err) => {
                log::debug!(target: LOG_TARGET, "userAgent unavailable: {}", js_reason(&err));
                String::new()
            }
        }
    }

    fn add_listener(&self, target: &web_sys::EventTarget, event: &str, callback: &js_sys::Function) {
        if let Err(err) = target.add_event_listener_with_callback(event, callback) {
            log::warn!(target: LOG_TARGET, "could not listen for {event}: {}", js_reason(&err));
        }
    }
}

fn inline_style(el: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    el.dyn_ref::<SvgElement>().map(SvgElement::style)
}

fn elements_of(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length()).filter_map(|i| list.item(i)).flat_map(|node| node.dyn_into::<Element>()).collect()
}

fn event_name(kind: Listen) -> &'static str {
    match kind {
        Listen::Click | Listen::ExclusiveClick => "click",
        Listen::Input => "input",
        Listen::Change => "change",
    }
}

fn event_info(event: &Event) -> EventInfo {
    let target = event.target();
    let on_self = target.is_some() && target == event.current_target();
    let target = target.as_ref();
    if let Some(input) = target.and_then(|t| t.dyn_ref::<HtmlInputElement>()) {
        return EventInfo { on_self, value: input.value(), checked: input.checked() };
    }
    if let Some(select) = target.and_then(|t| t.dyn_ref::<HtmlSelectElement>()) {
        return EventInfo { on_self, value: select.value(), checked: false };
    }
    EventInfo { on_self, ..EventInfo::default() }
}

impl Dom for BrowserDom {
    type Element = Element;

    fn find(&self, scope: Option<&Element>, selector: &Selector) -> Option<Element> {
        let css = selector.to_string();
        let found = match scope {
            Some(el) => el.query_selector(&css),
            None => self.document.query_selector(&css),
        };
        match found {
            Ok(el) => el,
            Err(err) => {
                log::debug!(target: LOG_TARGET, "query {css} failed: {}", js_reason(&err));
                None
            }
        }
    }

    fn find_all(&self, scope: Option<&Element>, selector: &Selector) -> Vec<Element> {
        let css = selector.to_string();
        let found = match scope {
            Some(el) => el.query_selector_all(&css),
            None => self.document.query_selector_all(&css),
        };
        match found {
            Ok(list) => elements_of(&list),
            Err(err) => {
                log::debug!(target: LOG_TARGET, "query {css} failed: {}", js_reason(&err));
                Vec::new()
            }
        }
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn parent(&self, el: &Element) -> Option<Element> {
        el.parent_element()
    }

    fn children(&self, el: &Element) -> Vec<Element> {
        let children = el.children();
        (0..children.length()).filter_map(|i| children.item(i)).collect()
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn head(&self) -> Option<Element> {
        self.document.head().map(JsCast::unchecked_into)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(JsCast::unchecked_into)
    }

    fn tag_name(&self, el: &Element) -> String {
        el.tag_name().to_ascii_lowercase()
    }

    fn text_content(&self, el: &Element) -> String {
        el.text_content().unwrap_or_default()
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn style(&self, el: &Element, property: &str) -> String {
        inline_style(el).map(|style| style.get_property_value(property).unwrap_or_default()).unwrap_or_default()
    }

    fn value(&self, el: &Element) -> String {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return input.value();
        }
        el.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value).unwrap_or_default()
    }

    fn checked(&self, el: &Element) -> bool {
        el.dyn_ref::<HtmlInputElement>().is_some_and(HtmlInputElement::checked)
    }

    fn title(&self) -> String {
        self.document.title()
    }

    fn set_text_content(&self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn set_attribute(&self, el: &Element, name: &str, value: &str) -> Result<(), TweakError> {
        el.set_attribute(name, value).map_err(dom_err)
    }

    fn set_style(&self, el: &Element, property: &str, value: &str) -> Result<(), TweakError> {
        let Some(style) = inline_style(el) else {
            return Err(TweakError::Dom(format!("<{}> has no inline style", el.tag_name())));
        };
        if value.is_empty() {
            style.remove_property(property).map(drop).map_err(dom_err)
        } else {
            style.set_property(property, value).map_err(dom_err)
        }
    }

    fn set_value(&self, el: &Element, value: &str) {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn set_checked(&self, el: &Element, checked: bool) {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_checked(checked);
        }
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn create_element(&self, tag: &str) -> Result<Element, TweakError> {
        self.document.create_element(tag).map_err(dom_err)
    }

    fn create_svg_element(&self, tag: &str) -> Result<Element, TweakError> {
        self.document.create_element_ns(Some(SVG_NS), tag).map_err(dom_err)
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), TweakError> {
        parent.append_child(child).map(drop).map_err(dom_err)
    }

    fn insert_before(&self, node: &Element, reference: &Element) -> Result<(), TweakError> {
        let Some(parent) = reference.parent_node() else {
            return Err(TweakError::Dom("reference node has no parent".to_owned()));
        };
        parent.insert_before(node, Some(reference)).map(drop).map_err(dom_err)
    }

    fn listen(&self, el: &Element, kind: Listen, handler: EventHandler) {
        let closure = Closure::<dyn Fn(Event)>::new(move |event: Event| {
            if kind == Listen::ExclusiveClick {
                event.prevent_default();
                event.stop_propagation();
            }
            handler(&event_info(&event));
        });
        self.add_listener(el, event_name(kind), closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_key_down(&self, handler: KeyHandler) {
        let closure = Closure::<dyn Fn(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let modifiers = Modifiers {
                shift: event.shift_key(),
                ctrl: event.ctrl_key(),
                alt: event.alt_key(),
                meta: event.meta_key(),
            };
            if handler(&KeyPress::new(event.key(), modifiers)) {
                event.prevent_default();
                event.stop_propagation();
            }
        });
        self.add_listener(&self.document, "keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn watch(&self, handler: Box<dyn Fn()>) {
        let Some(body) = self.document.body() else {
            log::warn!(target: LOG_TARGET, "no <body> to observe; live updates disabled");
            return;
        };
        let closure = Closure::<dyn Fn(js_sys::Array, MutationObserver)>::new(move |_records: js_sys::Array, _observer: MutationObserver| {
            handler();
        });
        let observer = match MutationObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(err) => {
                log::warn!(target: LOG_TARGET, "MutationObserver unavailable: {}", js_reason(&err));
                return;
            }
        };
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        if let Err(err) = observer.observe_with_options(&body, &init) {
            log::warn!(target: LOG_TARGET, "could not observe <body>: {}", js_reason(&err));
            return;
        }
        closure.forget();
    }

    fn when_ready(&self, handler: Box<dyn FnOnce()>) {
        if self.document.ready_state() != "loading" {
            handler();
            return;
        }
        let callback = Closure::once_into_js(move || handler());
        self.add_listener(&self.document, "DOMContentLoaded", callback.unchecked_ref());
    }
}
