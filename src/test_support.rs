//! In-memory fakes for the platform traits, shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::error::{SessionError, StorageError};
use crate::net::types::User;
use crate::platform::{
    AuthGroup, Dom, HeaderView, KeyValueStore, Notifier, Page, RevealSink, SessionApi, Timer, ToastSurface,
};

pub fn user(name: &str) -> User {
    User::from_json(serde_json::json!({ "name": name })).unwrap_or_else(|e| panic!("bad fixture: {e}"))
}

pub fn user_with_avatar(name: &str, avatar: &str) -> User {
    User::from_json(serde_json::json!({ "name": name, "avatar_url": avatar }))
        .unwrap_or_else(|e| panic!("bad fixture: {e}"))
}

// =============================================================
// SessionApi
// =============================================================

/// Scripted backend. Counts calls; can hold its answer until released.
#[derive(Default)]
pub struct FakeApi {
    responses: RefCell<VecDeque<Result<User, SessionError>>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    calls: Cell<usize>,
}

impl FakeApi {
    pub fn returning(result: Result<User, SessionError>) -> Rc<Self> {
        let api = Self::default();
        api.responses.borrow_mut().push_back(result);
        Rc::new(api)
    }

    /// Backend that answers only after the returned sender fires.
    pub fn gated(result: Result<User, SessionError>) -> (Rc<Self>, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let api = Self::default();
        api.responses.borrow_mut().push_back(result);
        *api.gate.borrow_mut() = Some(rx);
        (Rc::new(api), tx)
    }

    pub fn push(&self, result: Result<User, SessionError>) {
        self.responses.borrow_mut().push_back(result);
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl SessionApi for FakeApi {
    async fn current_user(&self) -> Result<User, SessionError> {
        self.calls.set(self.calls.get() + 1);
        let gate = self.gate.borrow_mut().take();
        if let Some(rx) = gate {
            rx.await.unwrap_or_else(|_| panic!("gate dropped"));
        }
        self.responses.borrow_mut().pop_front().unwrap_or(Err(SessionError::Unavailable))
    }
}

// =============================================================
// Storage
// =============================================================

/// Store that reads normally but refuses every write.
#[derive(Default)]
pub struct ReadOnlyStore {
    entries: RefCell<HashMap<String, String>>,
}

impl ReadOnlyStore {
    pub fn seed(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write { key: key.to_owned(), reason: "QuotaExceededError".to_owned() })
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

// =============================================================
// Page
// =============================================================

pub struct FakePage {
    pathname: String,
    visible: RefCell<HashMap<AuthGroup, bool>>,
    pub replaced: RefCell<Vec<String>>,
    pub assigned: RefCell<Vec<String>>,
}

impl FakePage {
    pub fn at(pathname: &str) -> Self {
        Self {
            pathname: pathname.to_owned(),
            visible: RefCell::new(HashMap::new()),
            replaced: RefCell::new(Vec::new()),
            assigned: RefCell::new(Vec::new()),
        }
    }

    pub fn is_visible(&self, group: AuthGroup) -> Option<bool> {
        self.visible.borrow().get(&group).copied()
    }
}

impl Page for FakePage {
    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn set_group_visible(&self, group: AuthGroup, visible: bool) {
        self.visible.borrow_mut().insert(group, visible);
    }

    fn replace_location(&self, url: &str) {
        self.replaced.borrow_mut().push(url.to_owned());
    }

    fn assign_location(&self, url: &str) {
        self.assigned.borrow_mut().push(url.to_owned());
    }
}

// =============================================================
// Dom
// =============================================================

#[derive(Clone, Debug, Default)]
struct NodeData {
    tag: String,
    attrs: BTreeMap<String, String>,
    text: String,
    children: Vec<usize>,
    parent: Option<usize>,
}

/// Arena-backed element tree with class, attribute, and tag selectors.
pub struct FakeDom {
    nodes: RefCell<Vec<NodeData>>,
}

impl FakeDom {
    pub const ROOT: usize = 0;

    pub fn new() -> Self {
        let root = NodeData { tag: "html".to_owned(), ..NodeData::default() };
        Self { nodes: RefCell::new(vec![root]) }
    }

    /// Create a detached element with attributes.
    pub fn element(&self, tag: &str, attrs: &[(&str, &str)]) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData {
            tag: tag.to_owned(),
            attrs: attrs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
            ..NodeData::default()
        });
        nodes.len() - 1
    }

    /// Create an element and append it under `parent`.
    pub fn add(&self, parent: usize, tag: &str, attrs: &[(&str, &str)]) -> usize {
        let id = self.element(tag, attrs);
        self.append_child(&parent, &id);
        id
    }

    /// `section.bc-child > div.bc-child__card` with a name label, an icon
    /// strip holding `icons` images, and one trigger per action.
    pub fn child_card(&self, section: usize, name: &str, icons: usize, child_id: Option<&str>) -> usize {
        let card = match child_id {
            Some(id) => self.add(section, "div", &[("class", "bc-child__card"), ("data-child", id)]),
            None => self.add(section, "div", &[("class", "bc-child__card")]),
        };
        let label = self.add(card, "h3", &[("class", "bc-child__name")]);
        self.set_text(&label, name);
        let pills = self.add(card, "div", &[("class", "bc-child__pills")]);
        for _ in 0..icons {
            self.add(pills, "img", &[("src", "img/icons/pill.svg"), ("alt", "Remédio")]);
        }
        self.add(card, "button", &[("data-action", "add-medicine")]);
        self.add(card, "button", &[("data-action", "add-child")]);
        card
    }

    pub fn section(&self) -> usize {
        self.add(Self::ROOT, "section", &[("class", "bc-child")])
    }

    pub fn text(&self, id: usize) -> String {
        self.nodes.borrow()[id].text.clone()
    }

    pub fn tag(&self, id: usize) -> String {
        self.nodes.borrow()[id].tag.clone()
    }

    pub fn children(&self, id: usize) -> Vec<usize> {
        self.nodes.borrow()[id].children.clone()
    }

    pub fn is_attached(&self, id: usize) -> bool {
        let nodes = self.nodes.borrow();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == Self::ROOT {
                return true;
            }
            cursor = nodes[current].parent;
        }
        false
    }

    pub fn icon_count(&self, card: usize) -> usize {
        self.query(&card, ".bc-child__pills")
            .map_or(0, |pills| self.query_all(&pills, "img").len())
    }

    fn matches(&self, id: usize, selector: &str) -> bool {
        let nodes = self.nodes.borrow();
        let node = &nodes[id];
        if let Some(class) = selector.strip_prefix('.') {
            return node
                .attrs
                .get("class")
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class));
        }
        if let Some(inner) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return match inner.split_once('=') {
                Some((name, value)) => node.attrs.get(name).map(String::as_str) == Some(value.trim_matches('"')),
                None => node.attrs.contains_key(inner),
            };
        }
        node.tag == selector
    }

    fn descendants(&self, id: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.children(id).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).into_iter().rev());
        }
        out
    }

    fn clone_subtree(&self, id: usize, parent: Option<usize>) -> usize {
        let source = self.nodes.borrow()[id].clone();
        let copy = {
            let mut nodes = self.nodes.borrow_mut();
            nodes.push(NodeData { children: Vec::new(), parent, ..source.clone() });
            nodes.len() - 1
        };
        for child in source.children {
            let child_copy = self.clone_subtree(child, Some(copy));
            self.nodes.borrow_mut()[copy].children.push(child_copy);
        }
        copy
    }
}

impl Dom for FakeDom {
    type Node = usize;

    fn root(&self) -> Option<usize> {
        Some(Self::ROOT)
    }

    fn closest(&self, node: &usize, selector: &str) -> Option<usize> {
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if self.matches(current, selector) {
                return Some(current);
            }
            cursor = self.nodes.borrow()[current].parent;
        }
        None
    }

    fn query(&self, root: &usize, selector: &str) -> Option<usize> {
        self.descendants(*root).into_iter().find(|id| self.matches(*id, selector))
    }

    fn query_all(&self, root: &usize, selector: &str) -> Vec<usize> {
        self.descendants(*root)
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    fn parent(&self, node: &usize) -> Option<usize> {
        self.nodes.borrow()[*node].parent
    }

    fn attribute(&self, node: &usize, name: &str) -> Option<String> {
        self.nodes.borrow()[*node].attrs.get(name).cloned()
    }

    fn set_attribute(&self, node: &usize, name: &str, value: &str) {
        self.nodes.borrow_mut()[*node].attrs.insert(name.to_owned(), value.to_owned());
    }

    fn set_text(&self, node: &usize, text: &str) {
        let children = self.children(*node);
        for child in children {
            self.remove(&child);
        }
        self.nodes.borrow_mut()[*node].text = text.to_owned();
    }

    fn create_element(&self, tag: &str) -> Option<usize> {
        Some(self.element(tag, &[]))
    }

    fn append_child(&self, parent: &usize, child: &usize) {
        self.remove(child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[*child].parent = Some(*parent);
        nodes[*parent].children.push(*child);
    }

    fn deep_clone(&self, node: &usize) -> Option<usize> {
        Some(self.clone_subtree(*node, None))
    }

    fn remove(&self, node: &usize) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[*node].parent.take() {
            nodes[parent].children.retain(|c| c != node);
        }
    }
}

// =============================================================
// Timer, toast surface, notifier, header
// =============================================================

struct Scheduled {
    delay_ms: u32,
    callback: Option<Box<dyn FnOnce()>>,
    cancelled: Rc<Cell<bool>>,
}

/// Manually driven timer; handles cancel on drop like `gloo_timers::Timeout`.
#[derive(Default)]
pub struct FakeTimer {
    scheduled: RefCell<Vec<Scheduled>>,
}

pub struct FakeTimeout(Rc<Cell<bool>>);

impl Drop for FakeTimeout {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

impl FakeTimer {
    /// Callbacks neither fired nor cancelled.
    pub fn pending(&self) -> usize {
        self.scheduled
            .borrow()
            .iter()
            .filter(|s| s.callback.is_some() && !s.cancelled.get())
            .count()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.scheduled.borrow().iter().map(|s| s.delay_ms).collect()
    }

    /// Run every live callback.
    pub fn fire_all(&self) {
        let due: Vec<Box<dyn FnOnce()>> = self
            .scheduled
            .borrow_mut()
            .iter_mut()
            .filter(|s| !s.cancelled.get())
            .filter_map(|s| s.callback.take())
            .collect();
        for callback in due {
            callback();
        }
    }
}

impl Timer for FakeTimer {
    type Handle = FakeTimeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> FakeTimeout {
        let cancelled = Rc::new(Cell::new(false));
        self.scheduled.borrow_mut().push(Scheduled {
            delay_ms,
            callback: Some(callback),
            cancelled: Rc::clone(&cancelled),
        });
        FakeTimeout(cancelled)
    }
}

#[derive(Default)]
pub struct FakeSurface {
    pub message: RefCell<String>,
    pub visible: Cell<bool>,
}

impl ToastSurface for FakeSurface {
    fn set_message(&self, message: &str) {
        *self.message.borrow_mut() = message.to_owned();
    }

    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}

#[derive(Default)]
pub struct FakeHeader {
    pub name: RefCell<Option<String>>,
    pub avatar: RefCell<Option<String>>,
}

impl HeaderView for FakeHeader {
    fn show_name(&self, name: &str) {
        *self.name.borrow_mut() = Some(name.to_owned());
    }

    fn show_avatar(&self, url: &str) {
        *self.avatar.borrow_mut() = Some(url.to_owned());
    }
}

/// Observer over numbered elements. Only watched elements receive entries.
#[derive(Default)]
pub struct FakeObserver {
    pub watched: RefCell<Vec<usize>>,
    pub classes: RefCell<Vec<(usize, String)>>,
}

impl FakeObserver {
    pub fn watching(nodes: &[usize]) -> Self {
        Self { watched: RefCell::new(nodes.to_vec()), ..Self::default() }
    }

    /// Entries for the watched subset of `(node, intersecting)` pairs.
    pub fn deliver(&self, entries: &[(usize, bool)]) -> Vec<(usize, bool)> {
        let watched = self.watched.borrow();
        entries.iter().copied().filter(|(node, _)| watched.contains(node)).collect()
    }
}

impl RevealSink for FakeObserver {
    type Node = usize;

    fn add_class(&self, node: &usize, class: &str) {
        self.classes.borrow_mut().push((*node, class.to_owned()));
    }

    fn unobserve(&self, node: &usize) {
        self.watched.borrow_mut().retain(|n| n != node);
    }
}
