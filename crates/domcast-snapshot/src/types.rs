//! Snapshot tree data model
//!
//! JSON-safe mirror of the host tree. The integer `type` tag emitted for
//! each node kind is a wire contract shared with the replay side:
//! Document=0, DocumentType=1, Element=2, Text=3, CDATA=4, Comment=5.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Synthetic attribute: vertical scroll offset
pub const SCROLL_TOP_ATTR: &str = "rr_scrollTop";
/// Synthetic attribute: horizontal scroll offset
pub const SCROLL_LEFT_ATTR: &str = "rr_scrollLeft";
/// Synthetic attribute: rendered width of a blocked element
pub const WIDTH_ATTR: &str = "rr_width";
/// Synthetic attribute: rendered height of a blocked element
pub const HEIGHT_ATTR: &str = "rr_height";

/// JSON-safe attribute value
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A node in the snapshot tree
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedNode {
    /// Stable identity assigned by the Mirror
    pub id: u64,
    /// Kind-specific payload
    pub data: SerializedNodeData,
}

/// Kind-specific snapshot payload
#[derive(Debug, Clone, PartialEq)]
pub enum SerializedNodeData {
    Document {
        child_nodes: Vec<SerializedNode>,
    },
    DocumentType {
        name: String,
        public_id: String,
        system_id: String,
    },
    Element {
        /// Lower-cased tag name
        tag_name: String,
        attributes: BTreeMap<String, AttrValue>,
        child_nodes: Vec<SerializedNode>,
        is_svg: bool,
        is_custom: bool,
        needs_block: bool,
        /// Shadow content, under a distinct relation from child_nodes
        shadow: Option<Box<SerializedNode>>,
    },
    Text {
        text: String,
        /// True when the parent hosts a stylesheet
        is_style: bool,
        /// Script text is never masked and may be elided by policy
        is_script: bool,
    },
    Cdata {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl SerializedNodeData {
    /// The integer kind tag of the wire contract
    pub fn wire_tag(&self) -> u8 {
        match self {
            Self::Document { .. } => 0,
            Self::DocumentType { .. } => 1,
            Self::Element { .. } => 2,
            Self::Text { .. } => 3,
            Self::Cdata { .. } => 4,
            Self::Comment { .. } => 5,
        }
    }
}

impl SerializedNode {
    /// Ordinary children, empty for leaf kinds
    pub fn child_nodes(&self) -> &[SerializedNode] {
        match &self.data {
            SerializedNodeData::Document { child_nodes }
            | SerializedNodeData::Element { child_nodes, .. } => child_nodes,
            _ => &[],
        }
    }

    /// Element attributes, if this is an element
    pub fn attributes(&self) -> Option<&BTreeMap<String, AttrValue>> {
        match &self.data {
            SerializedNodeData::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }
}

impl Serialize for SerializedNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.data.wire_tag())?;
        map.serialize_entry("id", &self.id)?;
        match &self.data {
            SerializedNodeData::Document { child_nodes } => {
                map.serialize_entry("childNodes", child_nodes)?;
            }
            SerializedNodeData::DocumentType {
                name,
                public_id,
                system_id,
            } => {
                map.serialize_entry("name", name)?;
                map.serialize_entry("publicId", public_id)?;
                map.serialize_entry("systemId", system_id)?;
            }
            SerializedNodeData::Element {
                tag_name,
                attributes,
                child_nodes,
                is_svg,
                is_custom,
                needs_block,
                shadow,
            } => {
                map.serialize_entry("tagName", tag_name)?;
                map.serialize_entry("attributes", attributes)?;
                map.serialize_entry("childNodes", child_nodes)?;
                if *is_svg {
                    map.serialize_entry("isSVG", &true)?;
                }
                if *is_custom {
                    map.serialize_entry("isCustom", &true)?;
                }
                if *needs_block {
                    map.serialize_entry("needsBlock", &true)?;
                }
                if let Some(shadow) = shadow {
                    map.serialize_entry("shadow", shadow)?;
                }
            }
            SerializedNodeData::Text {
                text,
                is_style,
                is_script,
            } => {
                map.serialize_entry("textContent", text)?;
                if *is_style {
                    map.serialize_entry("isStyle", &true)?;
                }
                if *is_script {
                    map.serialize_entry("isScript", &true)?;
                }
            }
            SerializedNodeData::Cdata { text } | SerializedNodeData::Comment { text } => {
                map.serialize_entry("textContent", text)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tags() {
        assert_eq!(
            SerializedNodeData::Document {
                child_nodes: vec![]
            }
            .wire_tag(),
            0
        );
        assert_eq!(
            SerializedNodeData::DocumentType {
                name: "html".into(),
                public_id: String::new(),
                system_id: String::new(),
            }
            .wire_tag(),
            1
        );
        assert_eq!(
            SerializedNodeData::Text {
                text: String::new(),
                is_style: false,
                is_script: false,
            }
            .wire_tag(),
            3
        );
        assert_eq!(SerializedNodeData::Cdata { text: String::new() }.wire_tag(), 4);
        assert_eq!(
            SerializedNodeData::Comment {
                text: String::new()
            }
            .wire_tag(),
            5
        );
    }

    #[test]
    fn test_attr_value_from() {
        assert_eq!(AttrValue::from("x"), AttrValue::Str("x".into()));
        assert_eq!(AttrValue::from(2.0), AttrValue::Num(2.0));
        assert_eq!(AttrValue::from(true), AttrValue::Bool(true));
    }
}
