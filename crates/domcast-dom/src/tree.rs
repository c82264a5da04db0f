//! DOM Tree (arena-based allocation)

use crate::{ElementData, Node, NodeData, NodeId};

/// Arena-based host tree
///
/// Node 0 is always the document root. Nodes are never deallocated while
/// the tree lives; `detach` only unlinks a subtree from its parent.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree containing only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// The document root
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Create an element node
    pub fn create_element(&mut self, tag_name: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Element(ElementData::new(tag_name)))
    }

    /// Create an element in the SVG namespace
    pub fn create_svg_element(&mut self, tag_name: impl Into<String>) -> NodeId {
        let mut data = ElementData::new(tag_name);
        data.is_svg = true;
        self.alloc(NodeData::Element(data))
    }

    /// Create a text node
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(content.into()))
    }

    /// Create a CDATA section
    pub fn create_cdata(&mut self, content: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Cdata(content.into()))
    }

    /// Create a comment node
    pub fn create_comment(&mut self, content: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Comment(content.into()))
    }

    /// Create a DOCTYPE node
    pub fn create_doctype(
        &mut self,
        name: impl Into<String>,
        public_id: impl Into<String>,
        system_id: impl Into<String>,
    ) -> NodeId {
        self.alloc(NodeData::Doctype {
            name: name.into(),
            public_id: public_id.into(),
            system_id: system_id.into(),
        })
    }

    /// Create a processing instruction
    pub fn create_processing_instruction(
        &mut self,
        target: impl Into<String>,
        data: impl Into<String>,
    ) -> NodeId {
        self.alloc(NodeData::ProcessingInstruction {
            target: target.into(),
            data: data.into(),
        })
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Get element data for a node
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Get mutable element data for a node
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Append a child in document order
    ///
    /// An element appended under an SVG parent inherits the namespace
    /// flag, as do any element descendants it already carries.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        let parent_svg = self
            .as_element(parent)
            .is_some_and(|e| e.is_svg || e.tag_name.eq_ignore_ascii_case("svg"));
        if parent_svg {
            self.mark_svg(child);
        }
    }

    fn mark_svg(&mut self, id: NodeId) {
        if let Some(el) = self.as_element_mut(id) {
            if el.is_svg {
                // an already-SVG subtree has its descendants flagged
                return;
            }
            el.is_svg = true;
        }
        let children = self.children(id).to_vec();
        for child in children {
            self.mark_svg(child);
        }
    }

    /// Attach a shadow root to an element, returning its node
    ///
    /// Idempotent: a host keeps its first shadow root.
    pub fn attach_shadow(&mut self, host: NodeId) -> NodeId {
        if let Some(existing) = self.as_element(host).and_then(|e| e.shadow_root) {
            return existing;
        }
        let shadow = self.alloc(NodeData::ShadowRoot);
        if let Some(node) = self.get_mut(shadow) {
            node.parent = Some(host);
        }
        if let Some(el) = self.as_element_mut(host) {
            el.shadow_root = Some(shadow);
        }
        shadow
    }

    /// Append a child under an element's shadow root
    pub fn append_shadow_child(&mut self, host: NodeId, child: NodeId) {
        let shadow = self.attach_shadow(host);
        self.append_child(shadow, child);
    }

    /// Unlink a subtree from its parent
    ///
    /// The nodes stay allocated; the caller is responsible for releasing
    /// any snapshot identities held for the detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.get(id).and_then(|n| n.parent) else {
            return;
        };
        tracing::debug!("Detaching node {:?} from {:?}", id, parent);
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|&c| c != id);
        }
        if let Some(el) = self.as_element_mut(parent) {
            if el.shadow_root == Some(id) {
                el.shadow_root = None;
            }
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Ordered children of a node (shadow children excluded)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Iterate ancestors from parent to root (shadow roots traverse to host)
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Nearest element at or above a node
    pub fn nearest_element(&self, id: NodeId) -> Option<NodeId> {
        if self.as_element(id).is_some() {
            return Some(id);
        }
        self.ancestors(id).find(|&a| self.as_element(a).is_some())
    }

    /// Effective stylesheet rule text for a style-hosting element
    ///
    /// Returns None when the element has no stylesheet capability or its
    /// rules are not accessible (e.g. cross-origin denial).
    pub fn effective_style_text(&self, id: NodeId) -> Option<String> {
        self.as_element(id)?.stylesheet.as_ref()?.effective_css()
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's ancestors
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
