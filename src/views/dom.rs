//! Headless document model the components render into.
//!
//! Nodes live in an arena keyed by [`NodeId`]; ids are never reused, so a
//! stale id held by a controller simply stops resolving once its node is
//! removed. Listeners are registered per node in [`Listeners`] and are
//! purged together with the subtree they belong to.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::events::{Action, EventKind};

use super::listeners::{Dispatch, Listeners};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    /// Leading text, rendered before any children.
    pub text: Option<String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub hidden: bool,
    pub disabled: bool,
    pub checked: bool,
    pub value: Option<String>,
}

/// Element builder.
#[derive(Debug, Clone, Default)]
pub struct El(Element);

impl El {
    pub fn new(tag: &str) -> Self {
        El(Element {
            tag: tag.to_string(),
            ..Element::default()
        })
    }

    pub fn id(mut self, id: &str) -> Self {
        self.0.id = Some(id.to_string());
        self
    }

    /// Accepts several space-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        for c in classes.split_whitespace() {
            if !self.0.classes.iter().any(|x| x == c) {
                self.0.classes.push(c.to_string());
            }
        }
        self
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.0.attrs.insert(key.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.0.text = Some(text.to_string());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.0.hidden = hidden;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.0.disabled = disabled;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.0.checked = checked;
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.0.value = Some(value.to_string());
        self
    }

    pub fn button(text: &str) -> Self {
        El::new("button").attr("type", "button").text(text)
    }

    pub fn checkbox(checked: bool) -> Self {
        El::new("input").attr("type", "checkbox").checked(checked)
    }
}

pub struct Document {
    nodes: HashMap<NodeId, Element>,
    next_id: u64,
    root: NodeId,
    active: Option<NodeId>,
    listeners: Listeners,
    observed: HashSet<NodeId>,
    mutations: Vec<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: HashMap::new(),
            next_id: 1,
            root: NodeId(0),
            active: None,
            listeners: Listeners::default(),
            observed: HashSet::new(),
            mutations: Vec::new(),
        };
        doc.root = doc.create(El::new("body"));
        doc
    }

    /// The `<body>` node everything hangs off.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// True when the node exists and is attached under the root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == self.root {
                return true;
            }
            cur = self.nodes.get(&n).and_then(|e| e.parent);
        }
        false
    }

    // ---------------- Tree ----------------

    pub fn create(&mut self, el: El) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, el.0);
        id
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        self.record_mutation(parent);
    }

    pub fn append_new(&mut self, parent: NodeId, el: El) -> NodeId {
        let id = self.create(el);
        self.append(parent, id);
        id
    }

    /// Inserts `child` as the first child of `parent`.
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.insert(0, child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        self.record_mutation(parent);
    }

    fn detach(&mut self, child: NodeId) {
        let Some(old_parent) = self.nodes.get(&child).and_then(|c| c.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(&old_parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = None;
        }
        self.record_mutation(old_parent);
    }

    fn drop_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if let Some(el) = self.nodes.remove(&n) {
                stack.extend(el.children);
            }
            self.listeners.purge(n);
            self.observed.remove(&n);
            if self.active == Some(n) {
                self.active = None;
            }
        }
    }

    pub fn clear_children(&mut self, node: NodeId) {
        let children = match self.nodes.get_mut(&node) {
            Some(el) => std::mem::take(&mut el.children),
            None => return,
        };
        let had_children = !children.is_empty();
        for child in children {
            self.drop_subtree(child);
        }
        if had_children {
            self.record_mutation(node);
        }
    }

    /// `textContent = text`: drops all children and sets the text.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        if let Some(el) = self.nodes.get_mut(&node) {
            el.text = if text.is_empty() { None } else { Some(text.to_string()) };
        }
    }

    /// Own leading text only.
    pub fn text(&self, node: NodeId) -> &str {
        self.nodes
            .get(&node)
            .and_then(|e| e.text.as_deref())
            .unwrap_or("")
    }

    /// Concatenated text of the node and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let Some(el) = self.nodes.get(&node) {
            if let Some(t) = &el.text {
                out.push_str(t);
            }
            for c in &el.children {
                self.collect_text(*c, out);
            }
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|e| e.parent)
    }

    // ---------------- Queries ----------------

    /// First connected element with this id, in tree order.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_in(self.root, &|el| el.id.as_deref() == Some(id))
    }

    pub fn find_in(&self, scope: NodeId, pred: &dyn Fn(&Element) -> bool) -> Option<NodeId> {
        let mut stack = vec![scope];
        while let Some(n) = stack.pop() {
            let Some(el) = self.nodes.get(&n) else {
                continue;
            };
            if pred(el) {
                return Some(n);
            }
            stack.extend(el.children.iter().rev());
        }
        None
    }

    pub fn find_all_in(&self, scope: NodeId, pred: &dyn Fn(&Element) -> bool) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![scope];
        while let Some(n) = stack.pop() {
            let Some(el) = self.nodes.get(&n) else {
                continue;
            };
            if pred(el) {
                out.push(n);
            }
            stack.extend(el.children.iter().rev());
        }
        out
    }

    pub fn find_all_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.find_all_in(scope, &|el| el.classes.iter().any(|c| c == class))
    }

    /// The node itself or its nearest ancestor matching `pred`.
    pub fn closest(&self, node: NodeId, pred: &dyn Fn(&Element) -> bool) -> Option<NodeId> {
        let mut cur = Some(node);
        while let Some(n) = cur {
            let el = self.nodes.get(&n)?;
            if pred(el) {
                return Some(n);
            }
            cur = el.parent;
        }
        None
    }

    pub fn closest_id(&self, node: NodeId, id: &str) -> Option<NodeId> {
        self.closest(node, &|el| el.id.as_deref() == Some(id))
    }

    // ---------------- Properties ----------------

    fn with_mut(&mut self, node: NodeId, f: impl FnOnce(&mut Element)) {
        if let Some(el) = self.nodes.get_mut(&node) {
            f(el);
        }
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        self.with_mut(node, |el| el.hidden = hidden);
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.nodes.get(&node).map(|e| e.hidden).unwrap_or(true)
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        self.with_mut(node, |el| el.disabled = disabled);
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.nodes.get(&node).map(|e| e.disabled).unwrap_or(false)
    }

    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        self.with_mut(node, |el| el.checked = checked);
    }

    pub fn is_checked(&self, node: NodeId) -> bool {
        self.nodes.get(&node).map(|e| e.checked).unwrap_or(false)
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.with_mut(node, |el| el.value = Some(value.to_string()));
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.nodes
            .get(&node)
            .and_then(|e| e.value.as_deref())
            .unwrap_or("")
    }

    pub fn set_attr(&mut self, node: NodeId, key: &str, value: &str) {
        self.with_mut(node, |el| {
            el.attrs.insert(key.to_string(), value.to_string());
        });
    }

    pub fn attr(&self, node: NodeId, key: &str) -> Option<&str> {
        self.nodes
            .get(&node)
            .and_then(|e| e.attrs.get(key))
            .map(String::as_str)
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(&node)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        self.with_mut(node, |el| {
            let present = el.classes.iter().any(|c| c == class);
            if on && !present {
                el.classes.push(class.to_string());
            } else if !on && present {
                el.classes.retain(|c| c != class);
            }
        });
    }

    /// `className = classes`
    pub fn set_classes(&mut self, node: NodeId, classes: &str) {
        self.with_mut(node, |el| {
            el.classes = classes.split_whitespace().map(str::to_string).collect();
        });
    }

    // ---------------- Focus ----------------

    pub fn focus(&mut self, node: NodeId) {
        if self.contains(node) {
            self.active = Some(node);
        }
    }

    pub fn blur(&mut self) {
        self.active = None;
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|n| self.contains(*n))
    }

    // ---------------- Mutation observation ----------------

    /// Starts reporting child-list changes of `node`. Returns false when it
    /// was already observed.
    pub fn observe_child_list(&mut self, node: NodeId) -> bool {
        self.contains(node) && self.observed.insert(node)
    }

    fn record_mutation(&mut self, parent: NodeId) {
        if self.observed.contains(&parent) && !self.mutations.contains(&parent) {
            self.mutations.push(parent);
        }
    }

    /// Observed nodes whose children changed since the last call.
    pub fn take_mutations(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.mutations)
    }

    // ---------------- Listeners ----------------

    pub fn on(&mut self, node: NodeId, kind: EventKind, action: Action) {
        if self.contains(node) {
            self.listeners.add(node, kind, action);
        }
    }

    /// Adds the listener only if this node/event pair was never wired
    /// before. Returns whether it was added.
    pub fn wire_once(&mut self, node: NodeId, kind: EventKind, action: Action) -> bool {
        if !self.contains(node) {
            return false;
        }
        self.listeners.wire_once(node, kind, action)
    }

    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.listeners.count(node, kind)
    }

    /// Resolves which actions an event on `target` triggers, bubbling from
    /// the target up to the root. The path is computed before any handler
    /// runs, like a browser does.
    pub fn dispatch(&self, target: NodeId, kind: EventKind) -> Vec<Dispatch> {
        let mut path = Vec::new();
        let mut cur = Some(target);
        while let Some(n) = cur {
            if !self.contains(n) {
                break;
            }
            path.push(n);
            cur = self.parent(n);
        }
        self.listeners.for_path(&path, target, kind)
    }

    // ---------------- Serialization ----------------

    pub fn to_html(&self, node: NodeId) -> String {
        super::html::outer_html(self, node)
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        super::html::inner_html(self, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_children_drops_subtree_and_listeners() {
        let mut doc = Document::new();
        let root = doc.root();
        let list = doc.append_new(root, El::new("div").id("list"));
        let btn = doc.append_new(list, El::button("Remove"));
        doc.on(btn, EventKind::Click, Action::RemoveFromWatchlist("AAPL".into()));
        doc.focus(btn);

        doc.clear_children(list);
        assert!(!doc.contains(btn));
        assert_eq!(doc.listener_count(btn, EventKind::Click), 0);
        assert_eq!(doc.active_element(), None);
        assert_eq!(doc.find_by_id("list"), Some(list));
    }

    #[test]
    fn set_text_replaces_children() {
        let mut doc = Document::new();
        let root = doc.root();
        let el = doc.append_new(root, El::new("div").text("a"));
        doc.append_new(el, El::new("span").text("b"));
        assert_eq!(doc.text_content(el), "ab");
        doc.set_text(el, "c");
        assert_eq!(doc.text_content(el), "c");
        assert!(doc.children(el).is_empty());
    }

    #[test]
    fn observed_child_list_reports_once_per_flush() {
        let mut doc = Document::new();
        let root = doc.root();
        let list = doc.append_new(root, El::new("div"));
        assert!(doc.observe_child_list(list));
        assert!(!doc.observe_child_list(list));

        doc.append_new(list, El::new("div"));
        doc.append_new(list, El::new("div"));
        assert_eq!(doc.take_mutations(), vec![list]);
        assert!(doc.take_mutations().is_empty());

        doc.clear_children(list);
        assert_eq!(doc.take_mutations(), vec![list]);
    }

    #[test]
    fn dispatch_bubbles_from_target_to_root() {
        let mut doc = Document::new();
        let root = doc.root();
        let list = doc.append_new(root, El::new("div"));
        let btn = doc.append_new(list, El::button("x").id("upgrade-btn-alerts"));
        doc.on(list, EventKind::Click, Action::AlertsListClick);
        doc.on(btn, EventKind::Click, Action::CloseProModal);

        let fired = doc.dispatch(btn, EventKind::Click);
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0].action, Action::CloseProModal);
        assert_eq!(fired[1].current, list);
        assert_eq!(fired[1].target, btn);

        // listeners stay until their node goes
        assert_eq!(doc.dispatch(list, EventKind::Click).len(), 1);
        assert!(doc.dispatch(btn, EventKind::Change).is_empty());
    }

    #[test]
    fn wire_once_is_idempotent() {
        let mut doc = Document::new();
        let root = doc.root();
        let btn = doc.append_new(root, El::button("×"));
        assert!(doc.wire_once(btn, EventKind::Click, Action::CloseProModal));
        assert!(!doc.wire_once(btn, EventKind::Click, Action::CloseProModal));
        assert_eq!(doc.listener_count(btn, EventKind::Click), 1);
    }

    #[test]
    fn detached_nodes_are_not_connected() {
        let mut doc = Document::new();
        let root = doc.root();
        let orphan = doc.create(El::new("div").id("ghost"));
        assert!(!doc.is_connected(orphan));
        assert_eq!(doc.find_by_id("ghost"), None);
        doc.append(root, orphan);
        assert!(doc.is_connected(orphan));
    }
}
