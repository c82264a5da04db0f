//! Identity Mirror
//!
//! Stable id<->node associations for one recording session. Ids grow
//! monotonically on first encounter and are never reused after release;
//! a later incremental update can therefore reference the same logical
//! node across snapshots.

use domcast_dom::NodeId;
use std::collections::HashMap;

/// Bidirectional id<->live-node map
#[derive(Debug)]
pub struct Mirror {
    ids: HashMap<NodeId, u64>,
    nodes: HashMap<u64, NodeId>,
    next_id: u64,
}

impl Mirror {
    /// Create a fresh mirror for a new recording session
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            nodes: HashMap::new(),
            next_id: 1,
        }
    }

    /// Existing id for a node, or allocate the next unused one
    ///
    /// Cannot fail; re-serializing the same node within the mirror's
    /// lifetime always yields the same id.
    pub fn id_for(&mut self, node: NodeId) -> u64 {
        if let Some(&id) = self.ids.get(&node) {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(node, id);
        self.nodes.insert(id, node);
        id
    }

    /// Live node for an id, if the association is still held
    pub fn node_for(&self, id: u64) -> Option<NodeId> {
        self.nodes.get(&id).copied()
    }

    /// Check whether a node already has an id
    pub fn has(&self, node: NodeId) -> bool {
        self.ids.contains_key(&node)
    }

    /// Drop the association for a node (e.g. when it is known detached)
    ///
    /// The released id is never handed out again within this session.
    pub fn release(&mut self, node: NodeId) {
        if let Some(id) = self.ids.remove(&node) {
            self.nodes.remove(&id);
        }
    }

    /// Explicit lifecycle reset: forget everything, restart id allocation
    pub fn reset(&mut self) {
        self.ids.clear();
        self.nodes.clear();
        self.next_id = 1;
    }

    /// Number of live associations
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if no associations are held
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for Mirror {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domcast_dom::DomTree;

    #[test]
    fn test_stable_ids() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let b = tree.create_element("b");

        let mut mirror = Mirror::new();
        let id_a = mirror.id_for(a);
        let id_b = mirror.id_for(b);

        assert_eq!(id_a, 1);
        assert_eq!(id_b, 2);
        assert_eq!(mirror.id_for(a), id_a);
        assert_eq!(mirror.node_for(id_b), Some(b));
        assert_eq!(mirror.len(), 2);
    }

    #[test]
    fn test_release_never_reuses() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");

        let mut mirror = Mirror::new();
        let first = mirror.id_for(a);
        mirror.release(a);

        assert!(!mirror.has(a));
        assert_eq!(mirror.node_for(first), None);

        let second = mirror.id_for(a);
        assert_ne!(first, second);
    }

    #[test]
    fn test_reset_restarts_allocation() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");

        let mut mirror = Mirror::new();
        mirror.id_for(a);
        mirror.reset();

        assert!(mirror.is_empty());
        assert_eq!(mirror.id_for(a), 1);
    }
}
