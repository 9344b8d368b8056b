//! In-memory [`Dom`] used by the test suites.
//!
//! Models just enough of a document for the reconciler and the panel: a
//! tree of elements with attributes, inline styles, text, form state, and
//! listeners. Every write through the [`Dom`] trait bumps a counter so tests
//! can assert that a pass changed nothing. Colour styles are echoed back in
//! `rgb(r, g, b)` form, the way browsers serialize them.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{Dom, EventHandler, EventInfo, KeyHandler, Listen, Selector};
use crate::color::parse_hex_rgb;
use crate::error::TweakError;
use crate::keys::KeyPress;

const ROOT: usize = 0;
const HEAD: usize = 1;
const BODY: usize = 2;

/// Handle to a node in a [`MemoryDom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeRef(usize);

type SharedHandler = Rc<dyn Fn(&EventInfo)>;
type SharedKeyHandler = Rc<dyn Fn(&KeyPress) -> bool>;

struct Node {
    tag: String,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    value: String,
    checked: bool,
    parent: Option<usize>,
    children: Vec<usize>,
    listeners: Vec<(Listen, SharedHandler)>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            style: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            checked: false,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

struct Tree {
    nodes: Vec<Node>,
    title: String,
    writes: usize,
    key_handlers: Vec<SharedKeyHandler>,
    watchers: Vec<Rc<dyn Fn()>>,
    /// Ready callbacks held back while the document is loading.
    pending: Option<Vec<Box<dyn FnOnce()>>>,
}

/// Shared, cloneable in-memory document.
#[derive(Clone)]
pub struct MemoryDom {
    tree: Rc<RefCell<Tree>>,
}

impl MemoryDom {
    /// Document with an empty `<head>` and `<body>` and the given title.
    #[must_use]
    pub fn new(title: &str) -> Self {
        let mut root = Node::new("html");
        root.children = vec![HEAD, BODY];
        let mut head = Node::new("head");
        head.parent = Some(ROOT);
        let mut body = Node::new("body");
        body.parent = Some(ROOT);
        let tree = Tree {
            nodes: vec![root, head, body],
            title: title.to_owned(),
            writes: 0,
            key_handlers: Vec::new(),
            watchers: Vec::new(),
            pending: None,
        };
        Self { tree: Rc::new(RefCell::new(tree)) }
    }

    /// Like [`MemoryDom::new`], but ready callbacks wait for [`MemoryDom::finish_loading`].
    #[must_use]
    pub fn loading(title: &str) -> Self {
        let dom = Self::new(title);
        dom.tree.borrow_mut().pending = Some(Vec::new());
        dom
    }

    // --- Builders (not counted as writes) ---

    /// The `<body>` element.
    #[must_use]
    pub fn body_ref(&self) -> NodeRef {
        NodeRef(BODY)
    }

    /// Append a new element with attributes under `parent`.
    pub fn add(&self, parent: NodeRef, tag: &str, attrs: &[(&str, &str)]) -> NodeRef {
        let mut tree = self.tree.borrow_mut();
        let mut node = Node::new(tag);
        for (name, value) in attrs {
            node.attrs.insert((*name).to_owned(), (*value).to_owned());
        }
        node.parent = Some(parent.0);
        let idx = tree.nodes.len();
        tree.nodes.push(node);
        tree.nodes[parent.0].children.push(idx);
        NodeRef(idx)
    }

    /// Append a new element holding `text` under `parent`.
    pub fn add_text(&self, parent: NodeRef, tag: &str, text: &str) -> NodeRef {
        let node = self.add(parent, tag, &[]);
        self.tree.borrow_mut().nodes[node.0].text = text.to_owned();
        node
    }

    /// Detach `el` from its parent, as the host framework does on re-render.
    pub fn remove(&self, el: NodeRef) {
        let mut tree = self.tree.borrow_mut();
        if let Some(parent) = tree.nodes[el.0].parent.take() {
            tree.nodes[parent].children.retain(|child| *child != el.0);
        }
    }

    /// Set an inline style without counting it, as host code would.
    pub fn host_style(&self, el: NodeRef, property: &str, value: &str) {
        self.tree.borrow_mut().nodes[el.0].style.insert(property.to_owned(), value.to_owned());
    }

    // --- Inspection ---

    /// Number of writes performed through the [`Dom`] trait so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.tree.borrow().writes
    }

    /// Number of attached elements carrying `id`.
    #[must_use]
    pub fn count_id(&self, id: &str) -> usize {
        let tree = self.tree.borrow();
        let mut count = 0;
        walk(&tree, ROOT, true, &mut |idx| {
            if tree.nodes[idx].attrs.get("id").map(String::as_str) == Some(id) {
                count += 1;
            }
        });
        count
    }

    /// Number of document key handlers registered.
    #[must_use]
    pub fn key_handler_count(&self) -> usize {
        self.tree.borrow().key_handlers.len()
    }

    /// Number of mutation watchers registered.
    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.tree.borrow().watchers.len()
    }

    /// Number of listeners attached to `el`.
    #[must_use]
    pub fn listener_count(&self, el: NodeRef) -> usize {
        self.tree.borrow().nodes[el.0].listeners.len()
    }

    // --- Simulated user and host activity ---

    /// Click `el`, bubbling to its ancestors until an exclusive listener runs.
    pub fn click(&self, el: NodeRef) {
        let mut current = Some(el.0);
        while let Some(idx) = current {
            let info = EventInfo { on_self: idx == el.0, ..self.form_state(el) };
            let handlers = self.handlers(idx, &[Listen::Click, Listen::ExclusiveClick]);
            let exclusive = handlers.iter().any(|(kind, _)| *kind == Listen::ExclusiveClick);
            for (_, handler) in handlers {
                handler(&info);
            }
            if exclusive {
                return;
            }
            current = self.tree.borrow().nodes[idx].parent;
        }
    }

    /// Type `value` into an input and fire `input`.
    pub fn type_text(&self, el: NodeRef, value: &str) {
        self.tree.borrow_mut().nodes[el.0].value = value.to_owned();
        self.fire(el, Listen::Input);
    }

    /// Set a checkbox and fire `change`.
    pub fn set_checkbox(&self, el: NodeRef, checked: bool) {
        self.tree.borrow_mut().nodes[el.0].checked = checked;
        self.fire(el, Listen::Change);
    }

    /// Pick an option in a select and fire `change`.
    pub fn choose(&self, el: NodeRef, value: &str) {
        self.tree.borrow_mut().nodes[el.0].value = value.to_owned();
        self.fire(el, Listen::Change);
    }

    /// Deliver a key press to document listeners. Returns whether one consumed it.
    pub fn press(&self, press: &KeyPress) -> bool {
        let handlers: Vec<SharedKeyHandler> = self.tree.borrow().key_handlers.clone();
        handlers.iter().fold(false, |consumed, handler| handler(press) || consumed)
    }

    /// End loading and run the ready callbacks that were waiting.
    pub fn finish_loading(&self) {
        let pending = self.tree.borrow_mut().pending.take().unwrap_or_default();
        for handler in pending {
            handler();
        }
    }

    /// Deliver a mutation notification to every watcher.
    pub fn notify_mutation(&self) {
        let watchers: Vec<Rc<dyn Fn()>> = self.tree.borrow().watchers.clone();
        for watcher in watchers {
            watcher();
        }
    }

    fn fire(&self, el: NodeRef, kind: Listen) {
        let info = EventInfo { on_self: true, ..self.form_state(el) };
        for (_, handler) in self.handlers(el.0, &[kind]) {
            handler(&info);
        }
    }

    fn form_state(&self, el: NodeRef) -> EventInfo {
        let tree = self.tree.borrow();
        let node = &tree.nodes[el.0];
        EventInfo { on_self: false, value: node.value.clone(), checked: node.checked }
    }

    fn handlers(&self, idx: usize, kinds: &[Listen]) -> Vec<(Listen, SharedHandler)> {
        self.tree.borrow().nodes[idx]
            .listeners
            .iter()
            .filter(|(kind, _)| kinds.contains(kind))
            .map(|(kind, handler)| (*kind, Rc::clone(handler)))
            .collect()
    }

    fn bump(&self) {
        self.tree.borrow_mut().writes += 1;
    }

    fn matching(&self, scope: Option<&NodeRef>, selector: &Selector, first_only: bool) -> Vec<NodeRef> {
        let tree = self.tree.borrow();
        let (start, include_start) = match scope {
            Some(el) => (el.0, false),
            None => (ROOT, true),
        };
        let mut found = Vec::new();
        walk(&tree, start, include_start, &mut |idx| {
            if first_only && !found.is_empty() {
                return;
            }
            let node = &tree.nodes[idx];
            if selector.matches(&node.tag, |name| node.attrs.get(name).cloned()) {
                found.push(NodeRef(idx));
            }
        });
        found
    }
}

/// Pre-order traversal of the subtree at `start`.
fn walk(tree: &Tree, start: usize, include_start: bool, visit: &mut dyn FnMut(usize)) {
    if include_start {
        visit(start);
    }
    for child in &tree.nodes[start].children {
        walk(tree, *child, true, visit);
    }
}

fn collect_text(tree: &Tree, idx: usize, out: &mut String) {
    let node = &tree.nodes[idx];
    out.push_str(&node.text);
    for child in &node.children {
        collect_text(tree, *child, out);
    }
}

/// Browsers echo hex colours back in `rgb()` form.
fn serialize_style(property: &str, value: &str) -> String {
    if property.ends_with("color") {
        if let Some((r, g, b)) = parse_hex_rgb(value) {
            return format!("rgb({r}, {g}, {b})");
        }
    }
    value.to_owned()
}

impl Dom for MemoryDom {
    type Element = NodeRef;

    fn find(&self, scope: Option<&NodeRef>, selector: &Selector) -> Option<NodeRef> {
        self.matching(scope, selector, true).into_iter().next()
    }

    fn find_all(&self, scope: Option<&NodeRef>, selector: &Selector) -> Vec<NodeRef> {
        self.matching(scope, selector, false)
    }

    fn by_id(&self, id: &str) -> Option<NodeRef> {
        let tree = self.tree.borrow();
        let mut found = None;
        walk(&tree, ROOT, true, &mut |idx| {
            if found.is_none() && tree.nodes[idx].attrs.get("id").map(String::as_str) == Some(id) {
                found = Some(NodeRef(idx));
            }
        });
        found
    }

    fn parent(&self, el: &NodeRef) -> Option<NodeRef> {
        self.tree.borrow().nodes[el.0].parent.map(NodeRef)
    }

    fn children(&self, el: &NodeRef) -> Vec<NodeRef> {
        self.tree.borrow().nodes[el.0].children.iter().copied().map(NodeRef).collect()
    }

    fn root(&self) -> Option<NodeRef> {
        Some(NodeRef(ROOT))
    }

    fn head(&self) -> Option<NodeRef> {
        Some(NodeRef(HEAD))
    }

    fn body(&self) -> Option<NodeRef> {
        Some(NodeRef(BODY))
    }

    fn tag_name(&self, el: &NodeRef) -> String {
        self.tree.borrow().nodes[el.0].tag.clone()
    }

    fn text_content(&self, el: &NodeRef) -> String {
        let tree = self.tree.borrow();
        let mut out = String::new();
        collect_text(&tree, el.0, &mut out);
        out
    }

    fn attribute(&self, el: &NodeRef, name: &str) -> Option<String> {
        self.tree.borrow().nodes[el.0].attrs.get(name).cloned()
    }

    fn style(&self, el: &NodeRef, property: &str) -> String {
        self.tree.borrow().nodes[el.0].style.get(property).cloned().unwrap_or_default()
    }

    fn value(&self, el: &NodeRef) -> String {
        self.tree.borrow().nodes[el.0].value.clone()
    }

    fn checked(&self, el: &NodeRef) -> bool {
        self.tree.borrow().nodes[el.0].checked
    }

    fn title(&self) -> String {
        self.tree.borrow().title.clone()
    }

    fn set_text_content(&self, el: &NodeRef, text: &str) {
        self.bump();
        let mut tree = self.tree.borrow_mut();
        let children = std::mem::take(&mut tree.nodes[el.0].children);
        for child in children {
            tree.nodes[child].parent = None;
        }
        tree.nodes[el.0].text = text.to_owned();
    }

    fn set_attribute(&self, el: &NodeRef, name: &str, value: &str) -> Result<(), TweakError> {
        self.bump();
        self.tree.borrow_mut().nodes[el.0].attrs.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn set_style(&self, el: &NodeRef, property: &str, value: &str) -> Result<(), TweakError> {
        self.bump();
        let mut tree = self.tree.borrow_mut();
        let style = &mut tree.nodes[el.0].style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_owned(), serialize_style(property, value));
        }
        Ok(())
    }

    fn set_value(&self, el: &NodeRef, value: &str) {
        self.bump();
        self.tree.borrow_mut().nodes[el.0].value = value.to_owned();
    }

    fn set_checked(&self, el: &NodeRef, checked: bool) {
        self.bump();
        self.tree.borrow_mut().nodes[el.0].checked = checked;
    }

    fn set_title(&self, title: &str) {
        self.bump();
        self.tree.borrow_mut().title = title.to_owned();
    }

    fn create_element(&self, tag: &str) -> Result<NodeRef, TweakError> {
        let mut tree = self.tree.borrow_mut();
        tree.nodes.push(Node::new(tag));
        Ok(NodeRef(tree.nodes.len() - 1))
    }

    fn create_svg_element(&self, tag: &str) -> Result<NodeRef, TweakError> {
        self.create_element(tag)
    }

    fn append_child(&self, parent: &NodeRef, child: &NodeRef) -> Result<(), TweakError> {
        self.bump();
        self.remove(*child);
        let mut tree = self.tree.borrow_mut();
        tree.nodes[child.0].parent = Some(parent.0);
        tree.nodes[parent.0].children.push(child.0);
        Ok(())
    }

    fn insert_before(&self, node: &NodeRef, reference: &NodeRef) -> Result<(), TweakError> {
        let Some(parent) = self.parent(reference) else {
            return Err(TweakError::Dom("reference node has no parent".to_owned()));
        };
        self.bump();
        self.remove(*node);
        let mut tree = self.tree.borrow_mut();
        let siblings = &mut tree.nodes[parent.0].children;
        let at = siblings.iter().position(|idx| *idx == reference.0).unwrap_or(siblings.len());
        siblings.insert(at, node.0);
        tree.nodes[node.0].parent = Some(parent.0);
        Ok(())
    }

    fn listen(&self, el: &NodeRef, kind: Listen, handler: EventHandler) {
        self.tree.borrow_mut().nodes[el.0].listeners.push((kind, Rc::from(handler)));
    }

    fn on_key_down(&self, handler: KeyHandler) {
        self.tree.borrow_mut().key_handlers.push(Rc::from(handler));
    }

    fn watch(&self, handler: Box<dyn Fn()>) {
        self.tree.borrow_mut().watchers.push(Rc::from(handler));
    }

    fn when_ready(&self, handler: Box<dyn FnOnce()>) {
        let mut tree = self.tree.borrow_mut();
        if let Some(pending) = tree.pending.as_mut() {
            pending.push(handler);
            return;
        }
        drop(tree);
        handler();
    }
}
