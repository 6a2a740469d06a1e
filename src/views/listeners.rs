use std::collections::{HashMap, HashSet};

use crate::events::{Action, EventKind};

use super::dom::NodeId;

/// One listener hit produced by dispatching an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    /// Node the listener is registered on.
    pub current: NodeId,
    /// Node the event originated from.
    pub target: NodeId,
    pub action: Action,
}

#[derive(Debug, Clone)]
struct Entry {
    kind: EventKind,
    action: Action,
}

#[derive(Debug, Default)]
pub struct Listeners {
    by_node: HashMap<NodeId, Vec<Entry>>,
    wired: HashSet<(NodeId, EventKind)>,
}

impl Listeners {
    pub fn add(&mut self, node: NodeId, kind: EventKind, action: Action) {
        self.by_node
            .entry(node)
            .or_default()
            .push(Entry { kind, action });
    }

    pub fn wire_once(&mut self, node: NodeId, kind: EventKind, action: Action) -> bool {
        if !self.wired.insert((node, kind)) {
            return false;
        }
        self.add(node, kind, action);
        true
    }

    pub fn count(&self, node: NodeId, kind: EventKind) -> usize {
        self.by_node
            .get(&node)
            .map(|v| v.iter().filter(|e| e.kind == kind).count())
            .unwrap_or(0)
    }

    pub fn purge(&mut self, node: NodeId) {
        self.by_node.remove(&node);
        self.wired.retain(|(n, _)| *n != node);
    }

    /// Collects matching listeners along `path`, target first.
    pub fn for_path(&self, path: &[NodeId], target: NodeId, kind: EventKind) -> Vec<Dispatch> {
        let mut out = Vec::new();
        for node in path {
            let Some(entries) = self.by_node.get(node) else {
                continue;
            };
            for e in entries.iter().filter(|e| e.kind == kind) {
                out.push(Dispatch {
                    current: *node,
                    target,
                    action: e.action.clone(),
                });
            }
        }
        out
    }
}
