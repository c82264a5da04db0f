//! DOM Node data
//!
//! Node kinds and element payloads for the host tree.

use crate::forms::FormState;
use crate::geometry::ElementGeometry;
use crate::style::StyleSheet;
use crate::NodeId;

/// A node in the host tree
#[derive(Debug)]
pub struct Node {
    /// Parent node (None if root or detached)
    pub parent: Option<NodeId>,
    /// Ordered children (shadow children live under the shadow root node)
    pub children: Vec<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// CDATA section
    Cdata(String),
    /// Comment
    Comment(String),
    /// Processing instruction
    ProcessingInstruction { target: String, data: String },
    /// Shadow root (host-side container; reached via ElementData::shadow_root)
    ShadowRoot,
}

/// Element-specific data
#[derive(Debug, Default)]
pub struct ElementData {
    /// Tag name as written in the source
    pub tag_name: String,
    /// True for elements in the SVG namespace
    pub is_svg: bool,
    /// Attributes in source order
    attrs: Vec<(String, String)>,
    /// Cached class list (kept in sync with the class attribute)
    classes: Vec<String>,
    /// Attached shadow root, if any
    pub shadow_root: Option<NodeId>,
    /// Live form-control state (input/textarea/select/option)
    pub form: Option<FormState>,
    /// Scroll offsets and rendered box
    pub geometry: ElementGeometry,
    /// Effective style rules for style-hosting elements
    pub stylesheet: Option<StyleSheet>,
}

impl ElementData {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Default::default()
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, keeping the class cache in sync
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if name == "class" {
            self.classes = value.split_whitespace().map(str::to_string).collect();
        }
        for attr in self.attrs.iter_mut() {
            if attr.0 == name {
                attr.1 = value;
                return;
            }
        }
        self.attrs.push((name, value));
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, name: &str) {
        if name == "class" {
            self.classes.clear();
        }
        self.attrs.retain(|(n, _)| n != name);
    }

    /// Iterate attributes in source order
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Cached class list
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Check class-token membership
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The raw class attribute value
    pub fn class_attr(&self) -> Option<&str> {
        self.get_attr("class")
    }

    /// The id attribute value
    pub fn id_attr(&self) -> Option<&str> {
        self.get_attr("id")
    }
}
