//! domcast DOM - Host document tree
//!
//! Arena-backed live tree that the snapshot serializer walks. Models the
//! observable surface of a rendered page: topology, attributes, shadow
//! roots, live form-control state, geometry, and effective style rules.

mod document;
mod forms;
mod geometry;
mod node;
mod selector;
mod style;
mod tree;

pub use document::Document;
pub use forms::{control_kind, ControlKind, FormState};
pub use geometry::ElementGeometry;
pub use node::{ElementData, Node, NodeData};
pub use selector::{AttrMatcher, AttrSelector, Selector, SelectorError};
pub use style::StyleSheet;
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document root ID
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
