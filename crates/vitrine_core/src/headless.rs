//! Headless page host
//!
//! An in-memory document implementing [`Page`] without a browser. Frames
//! and intersection events never happen on their own: tests pump them with
//! [`HeadlessPage::run_frame`] and [`HeadlessPage::intersect`], which makes
//! the deferred and asynchronous paths deterministic.
//!
//! Selector support is limited to single compound selectors such as
//! `button`, `#toggle-lang`, `.btn-label`, `i.fa-sun` or `[data-pl]`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::page::{FrameTask, IntersectionCallback, IntersectionEntry, Page, ViewportWatcher};

new_key_type! {
    /// Element handle in a [`HeadlessPage`]
    pub struct NodeId;

    /// Identifier of an installed headless viewport watcher
    pub struct WatcherId;
}

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    classes: SmallVec<[String; 4]>,
    attributes: FxHashMap<String, String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    /// Document-absolute top edge
    top: f64,
    height: f64,
    /// Value restored by a form reset
    default_value: Option<String>,
}

struct WatcherSlot {
    threshold: f64,
    observed: Vec<NodeId>,
    callback: Option<IntersectionCallback<NodeId>>,
}

struct Document {
    nodes: SlotMap<NodeId, NodeData>,
    root: NodeId,
    body: NodeId,
    reduced_motion: bool,
    intersection_supported: bool,
    /// Class name -> computed background-image, standing in for stylesheets
    backgrounds: FxHashMap<String, String>,
    frames: Vec<FrameTask>,
    watchers: SlotMap<WatcherId, WatcherSlot>,
    scroll_y: f64,
    scroll_log: Vec<f64>,
    notifications: Vec<String>,
}

/// In-memory [`Page`] implementation.
#[derive(Clone)]
pub struct HeadlessPage {
    doc: Rc<RefCell<Document>>,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPage {
    /// Create a document containing `<html><body></body></html>`.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData {
            tag: "html".to_string(),
            ..Default::default()
        });
        let body = nodes.insert(NodeData {
            tag: "body".to_string(),
            parent: Some(root),
            ..Default::default()
        });
        nodes[root].children.push(body);

        let doc = Document {
            nodes,
            root,
            body,
            reduced_motion: false,
            intersection_supported: true,
            backgrounds: FxHashMap::default(),
            frames: Vec::new(),
            watchers: SlotMap::with_key(),
            scroll_y: 0.0,
            scroll_log: Vec::new(),
            notifications: Vec::new(),
        };

        Self {
            doc: Rc::new(RefCell::new(doc)),
        }
    }

    // ========== Building ==========

    /// Create a detached element.
    pub fn create(&self, tag: &str) -> NodeId {
        self.doc.borrow_mut().nodes.insert(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        })
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append(&self, parent: NodeId, child: NodeId) {
        let mut doc = self.doc.borrow_mut();
        if !doc.nodes.contains_key(parent) || !doc.nodes.contains_key(child) {
            return;
        }
        if let Some(old) = doc.nodes[child].parent.take() {
            doc.nodes[old].children.retain(|c| *c != child);
        }
        doc.nodes[child].parent = Some(parent);
        doc.nodes[parent].children.push(child);
    }

    /// Create an element and append it to `parent`.
    pub fn element(&self, parent: NodeId, tag: &str) -> NodeId {
        let node = self.create(tag);
        self.append(parent, node);
        node
    }

    /// Append a named form field with an initial value.
    pub fn field(&self, form: NodeId, name: &str, initial: &str) -> NodeId {
        let node = self.element(form, "input");
        let mut doc = self.doc.borrow_mut();
        let data = &mut doc.nodes[node];
        data.attributes.insert("name".into(), name.into());
        data.attributes.insert("value".into(), initial.into());
        data.default_value = Some(initial.to_string());
        node
    }

    /// Simulate the user typing into a form field.
    pub fn set_value(&self, field: NodeId, value: &str) {
        self.set_attribute(&field, "value", value);
    }

    pub fn root(&self) -> NodeId {
        self.doc.borrow().root
    }

    pub fn body_node(&self) -> NodeId {
        self.doc.borrow().body
    }

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.doc.borrow().nodes.get(node).map(|n| n.tag.clone())
    }

    /// Space-separated class list, as `className` would report it.
    pub fn class_name(&self, node: NodeId) -> String {
        self.doc
            .borrow()
            .nodes
            .get(node)
            .map(|n| n.classes.join(" "))
            .unwrap_or_default()
    }

    // ========== Environment ==========

    pub fn set_reduced_motion(&self, on: bool) {
        self.doc.borrow_mut().reduced_motion = on;
    }

    /// Pretend the host has (or lacks) viewport-intersection support.
    pub fn set_intersection_supported(&self, on: bool) {
        self.doc.borrow_mut().intersection_supported = on;
    }

    /// Make elements carrying `class` compute `background` as their
    /// background image, as a loaded stylesheet would.
    pub fn define_background(&self, class: &str, background: &str) {
        self.doc
            .borrow_mut()
            .backgrounds
            .insert(class.to_string(), background.to_string());
    }

    /// Place `node` at a document-absolute `top` with the given height.
    pub fn set_layout(&self, node: NodeId, top: f64, height: f64) {
        if let Some(data) = self.doc.borrow_mut().nodes.get_mut(node) {
            data.top = top;
            data.height = height;
        }
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.doc.borrow_mut().scroll_y = y;
    }

    // ========== Pumping ==========

    pub fn pending_frames(&self) -> usize {
        self.doc.borrow().frames.len()
    }

    /// Run every task queued before this call. Tasks queued while running
    /// wait for the next frame. Returns how many tasks ran.
    pub fn run_frame(&self) -> usize {
        let tasks = std::mem::take(&mut self.doc.borrow_mut().frames);
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }

    /// Report `node` as `ratio` visible to every watcher tracking it.
    ///
    /// The entry is intersecting when `ratio` reaches the watcher's
    /// threshold. Returns how many watchers were notified.
    pub fn intersect(&self, node: NodeId, ratio: f64) -> usize {
        let ids: Vec<WatcherId> = self
            .doc
            .borrow()
            .watchers
            .iter()
            .filter(|(_, slot)| slot.observed.contains(&node))
            .map(|(id, _)| id)
            .collect();

        let mut delivered = 0;
        for id in ids {
            let taken = {
                let mut doc = self.doc.borrow_mut();
                doc.watchers
                    .get_mut(id)
                    .and_then(|slot| slot.callback.take().map(|cb| (slot.threshold, cb)))
            };
            let Some((threshold, mut callback)) = taken else {
                continue;
            };

            let entry = IntersectionEntry {
                target: node,
                is_intersecting: ratio > 0.0 && ratio >= threshold,
                ratio,
            };
            let handle = HeadlessWatcher {
                doc: Rc::downgrade(&self.doc),
                id,
            };
            // No borrow is held here: the callback may touch the page.
            callback(std::slice::from_ref(&entry), &handle);
            delivered += 1;

            if let Some(slot) = self.doc.borrow_mut().watchers.get_mut(id) {
                slot.callback = Some(callback);
            }
        }
        delivered
    }

    // ========== Inspection ==========

    /// Whether any watcher currently tracks `node`.
    pub fn is_observed(&self, node: NodeId) -> bool {
        self.doc
            .borrow()
            .watchers
            .values()
            .any(|slot| slot.observed.contains(&node))
    }

    pub fn watcher_count(&self) -> usize {
        self.doc.borrow().watchers.len()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.doc.borrow().notifications.clone()
    }

    /// Targets passed to [`Page::smooth_scroll_to`], oldest first.
    pub fn scroll_log(&self) -> Vec<f64> {
        self.doc.borrow().scroll_log.clone()
    }

    fn descendants(doc: &Document, from: NodeId, include_self: bool) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = if include_self {
            vec![from]
        } else {
            doc.nodes
                .get(from)
                .map(|n| n.children.iter().rev().copied().collect())
                .unwrap_or_default()
        };
        while let Some(id) = stack.pop() {
            let Some(data) = doc.nodes.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(data.children.iter().rev().copied());
        }
        out
    }

    fn collect_text(doc: &Document, node: NodeId, out: &mut String) {
        if let Some(data) = doc.nodes.get(node) {
            out.push_str(&data.text);
            for child in &data.children {
                Self::collect_text(doc, *child, out);
            }
        }
    }
}

// ========== Selectors ==========

#[derive(Debug, Default, PartialEq)]
struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
    attributes: SmallVec<[String; 2]>,
}

impl Selector {
    fn parse(src: &str) -> Option<Self> {
        let src = src.trim();
        if src.is_empty() {
            return None;
        }

        let mut sel = Selector::default();
        let mut rest = src;

        let tag_len = rest
            .find(|c: char| matches!(c, '.' | '#' | '['))
            .unwrap_or(rest.len());
        if tag_len > 0 {
            sel.tag = Some(rest[..tag_len].to_ascii_lowercase());
        }
        rest = &rest[tag_len..];

        while let Some(first) = rest.chars().next() {
            match first {
                '.' | '#' => {
                    let body = &rest[1..];
                    let len = body
                        .find(|c: char| matches!(c, '.' | '#' | '['))
                        .unwrap_or(body.len());
                    if len == 0 {
                        return None;
                    }
                    let ident = body[..len].to_string();
                    if first == '.' {
                        sel.classes.push(ident);
                    } else {
                        sel.id = Some(ident);
                    }
                    rest = &body[len..];
                }
                '[' => {
                    let end = rest.find(']')?;
                    let name = rest[1..end].trim();
                    let valid = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
                    if name.is_empty() || !name.chars().all(valid) {
                        return None;
                    }
                    sel.attributes.push(name.to_string());
                    rest = &rest[end + 1..];
                }
                _ => return None,
            }
        }

        if sel.tag.as_deref().is_some_and(|t| t.contains(char::is_whitespace)) {
            return None;
        }
        Some(sel)
    }

    fn matches(&self, node: &NodeData) -> bool {
        if self.tag.as_deref().is_some_and(|t| t != node.tag) {
            return false;
        }
        if let Some(id) = &self.id {
            if node.attributes.get("id") != Some(id) {
                return false;
            }
        }
        self.classes.iter().all(|c| node.classes.contains(c))
            && self
                .attributes
                .iter()
                .all(|a| node.attributes.contains_key(a))
    }
}

// ========== Page ==========

/// Viewport watcher handle for [`HeadlessPage`].
#[derive(Clone)]
pub struct HeadlessWatcher {
    doc: Weak<RefCell<Document>>,
    id: WatcherId,
}

impl HeadlessWatcher {
    fn with_slot(&self, f: impl FnOnce(&mut WatcherSlot, &SlotMap<NodeId, NodeData>)) {
        if let Some(doc) = self.doc.upgrade() {
            let mut doc = doc.borrow_mut();
            let Document { watchers, nodes, .. } = &mut *doc;
            if let Some(slot) = watchers.get_mut(self.id) {
                f(slot, nodes);
            }
        }
    }
}

impl ViewportWatcher<NodeId> for HeadlessWatcher {
    fn observe(&self, node: &NodeId) {
        self.with_slot(|slot, nodes| {
            if nodes.contains_key(*node) && !slot.observed.contains(node) {
                slot.observed.push(*node);
            }
        });
    }

    fn unobserve(&self, node: &NodeId) {
        self.with_slot(|slot, _| slot.observed.retain(|n| n != node));
    }

    fn disconnect(&self) {
        self.with_slot(|slot, _| slot.observed.clear());
    }
}

impl Page for HeadlessPage {
    type Node = NodeId;
    type Watcher = HeadlessWatcher;

    fn document_element(&self) -> Option<NodeId> {
        Some(self.doc.borrow().root)
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.doc.borrow().body)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let doc = self.doc.borrow();
        Self::descendants(&doc, doc.root, true)
            .into_iter()
            .find(|n| doc.nodes[*n].attributes.get("id").map(String::as_str) == Some(id))
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(sel) = Selector::parse(selector) else {
            tracing::debug!(selector, "unsupported headless selector");
            return Vec::new();
        };
        let doc = self.doc.borrow();
        Self::descendants(&doc, doc.root, true)
            .into_iter()
            .filter(|n| sel.matches(&doc.nodes[*n]))
            .collect()
    }

    fn query_in(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let sel = Selector::parse(selector)?;
        let doc = self.doc.borrow();
        Self::descendants(&doc, *node, false)
            .into_iter()
            .find(|n| sel.matches(&doc.nodes[*n]))
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.doc
            .borrow()
            .nodes
            .get(*node)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        if let Some(data) = self.doc.borrow_mut().nodes.get_mut(*node) {
            data.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn text(&self, node: &NodeId) -> String {
        let doc = self.doc.borrow();
        let mut out = String::new();
        Self::collect_text(&doc, *node, &mut out);
        out
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        let mut doc = self.doc.borrow_mut();
        let Some(data) = doc.nodes.get_mut(*node) else {
            return;
        };
        data.text = text.to_string();
        let children = std::mem::take(&mut data.children);
        for child in children {
            if let Some(c) = doc.nodes.get_mut(child) {
                c.parent = None;
            }
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.doc
            .borrow()
            .nodes
            .get(*node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if let Some(data) = self.doc.borrow_mut().nodes.get_mut(*node) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        if let Some(data) = self.doc.borrow_mut().nodes.get_mut(*node) {
            data.classes.retain(|c| c != class);
        }
    }

    fn set_class_name(&self, node: &NodeId, class_name: &str) {
        if let Some(data) = self.doc.borrow_mut().nodes.get_mut(*node) {
            data.classes = class_name.split_whitespace().map(str::to_string).collect();
        }
    }

    fn background_image(&self, node: &NodeId) -> Option<String> {
        let doc = self.doc.borrow();
        let data = doc.nodes.get(*node)?;
        let image = data
            .classes
            .iter()
            .find_map(|c| doc.backgrounds.get(c).cloned())
            .unwrap_or_else(|| "none".to_string());
        Some(image)
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.doc.borrow().reduced_motion
    }

    fn request_frame(&self, task: FrameTask) {
        self.doc.borrow_mut().frames.push(task);
    }

    fn watch_viewport(
        &self,
        threshold: f64,
        on_entries: IntersectionCallback<NodeId>,
    ) -> Option<HeadlessWatcher> {
        let mut doc = self.doc.borrow_mut();
        if !doc.intersection_supported {
            return None;
        }
        let id = doc.watchers.insert(WatcherSlot {
            threshold,
            observed: Vec::new(),
            callback: Some(on_entries),
        });
        Some(HeadlessWatcher {
            doc: Rc::downgrade(&self.doc),
            id,
        })
    }

    fn viewport_top(&self, node: &NodeId) -> f64 {
        let doc = self.doc.borrow();
        doc.nodes.get(*node).map_or(0.0, |n| n.top - doc.scroll_y)
    }

    fn rendered_height(&self, node: &NodeId) -> f64 {
        self.doc.borrow().nodes.get(*node).map_or(0.0, |n| n.height)
    }

    fn scroll_y(&self) -> f64 {
        self.doc.borrow().scroll_y
    }

    fn smooth_scroll_to(&self, top: f64) {
        let mut doc = self.doc.borrow_mut();
        doc.scroll_y = top;
        doc.scroll_log.push(top);
    }

    fn form_fields(&self, form: &NodeId) -> Vec<(String, String)> {
        let doc = self.doc.borrow();
        Self::descendants(&doc, *form, false)
            .into_iter()
            .filter_map(|n| {
                let data = &doc.nodes[n];
                let name = data.attributes.get("name")?;
                let value = data.attributes.get("value").cloned().unwrap_or_default();
                Some((name.clone(), value))
            })
            .collect()
    }

    fn reset_form(&self, form: &NodeId) {
        let mut doc = self.doc.borrow_mut();
        for n in Self::descendants(&doc, *form, false) {
            let data = &mut doc.nodes[n];
            if let Some(initial) = data.default_value.clone() {
                data.attributes.insert("value".into(), initial);
            }
        }
    }

    fn notify(&self, message: &str) {
        self.doc.borrow_mut().notifications.push(message.to_string());
    }
}
