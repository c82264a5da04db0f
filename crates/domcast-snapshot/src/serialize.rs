//! Node Serializer
//!
//! Depth-first recursive transducer from the live tree to the snapshot
//! tree, composing the Mirror, the Blocking and Masking Engines, the
//! Stylesheet Rewriter, and Runtime-State Capture. Never fails on
//! malformed input; unsupported node kinds yield None and are dropped.

use crate::block::is_blocked;
use crate::capture::{capture_control_value, capture_scroll, ControlValue};
use crate::config::SnapshotConfig;
use crate::css::absolutize_urls;
use crate::mask::{default_mask_text, needs_masking};
use crate::mirror::Mirror;
use crate::types::{
    AttrValue, SerializedNode, SerializedNodeData, HEIGHT_ATTR, SCROLL_LEFT_ATTR, SCROLL_TOP_ATTR,
    WIDTH_ATTR,
};
use domcast_dom::{ControlKind, DomTree, ElementData, NodeData, NodeId};
use std::collections::BTreeMap;

/// Snapshot the whole document
pub fn snapshot(tree: &DomTree, mirror: &mut Mirror, config: &SnapshotConfig) -> Option<SerializedNode> {
    serialize_node(tree, tree.root(), mirror, config)
}

/// Serialize one node (and, per config, its subtree)
///
/// The skip-children flag applies to the entry node only; recursion
/// below it always descends.
pub fn serialize_node(
    tree: &DomTree,
    id: NodeId,
    mirror: &mut Mirror,
    config: &SnapshotConfig,
) -> Option<SerializedNode> {
    serialize_with(tree, id, mirror, config, config.skip_child_nodes)
}

fn serialize_with(
    tree: &DomTree,
    id: NodeId,
    mirror: &mut Mirror,
    config: &SnapshotConfig,
    skip_children: bool,
) -> Option<SerializedNode> {
    let node = tree.get(id)?;
    match &node.data {
        NodeData::ProcessingInstruction { target, .. } => {
            tracing::debug!("Dropping unsupported node kind <?{}?>", target);
            None
        }
        NodeData::Document | NodeData::ShadowRoot => {
            let sid = mirror.id_for(id);
            let child_nodes = if skip_children {
                Vec::new()
            } else {
                serialize_children(tree, id, mirror, config)
            };
            Some(SerializedNode {
                id: sid,
                data: SerializedNodeData::Document { child_nodes },
            })
        }
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => {
            let sid = mirror.id_for(id);
            Some(SerializedNode {
                id: sid,
                data: SerializedNodeData::DocumentType {
                    name: name.clone(),
                    public_id: public_id.clone(),
                    system_id: system_id.clone(),
                },
            })
        }
        NodeData::Element(_) => serialize_element(tree, id, mirror, config, skip_children),
        NodeData::Text(_) => serialize_text(tree, id, mirror, config),
        NodeData::Cdata(text) => {
            let sid = mirror.id_for(id);
            Some(SerializedNode {
                id: sid,
                data: SerializedNodeData::Cdata { text: text.clone() },
            })
        }
        NodeData::Comment(text) => {
            if config.slim.comment {
                tracing::debug!("Dropping comment node (slim output)");
                return None;
            }
            let sid = mirror.id_for(id);
            Some(SerializedNode {
                id: sid,
                data: SerializedNodeData::Comment { text: text.clone() },
            })
        }
    }
}

fn serialize_children(
    tree: &DomTree,
    id: NodeId,
    mirror: &mut Mirror,
    config: &SnapshotConfig,
) -> Vec<SerializedNode> {
    tree.children(id)
        .iter()
        .filter_map(|&child| serialize_with(tree, child, mirror, config, false))
        .collect()
}

fn serialize_element(
    tree: &DomTree,
    id: NodeId,
    mirror: &mut Mirror,
    config: &SnapshotConfig,
    skip_children: bool,
) -> Option<SerializedNode> {
    let sid = mirror.id_for(id);
    let element = tree.as_element(id)?;
    let tag_name = element.tag_name.to_ascii_lowercase();
    let is_svg = element.is_svg || tag_name == "svg";
    let is_custom = tag_name.contains('-');

    if is_blocked(
        tree,
        id,
        &config.block_class,
        config.block_selector.as_ref(),
        config.allow_list.as_ref(),
    ) {
        tracing::debug!("Blocking subtree under <{}>", tag_name);
        let mut attributes = BTreeMap::new();
        if let Some(class_attr) = element.class_attr() {
            attributes.insert("class".to_string(), AttrValue::from(class_attr));
        }
        let (width, height) = element.geometry.bounding_box();
        attributes.insert(WIDTH_ATTR.to_string(), AttrValue::Num(width));
        attributes.insert(HEIGHT_ATTR.to_string(), AttrValue::Num(height));
        return Some(SerializedNode {
            id: sid,
            data: SerializedNodeData::Element {
                tag_name,
                attributes,
                child_nodes: Vec::new(),
                is_svg,
                is_custom,
                needs_block: true,
                shadow: None,
            },
        });
    }

    let mut attributes: BTreeMap<String, AttrValue> = BTreeMap::new();
    for (name, value) in element.attrs() {
        let value = if config.inline_stylesheet && name == "style" {
            absolutize_urls(value, &config.base_href)
        } else {
            value.to_string()
        };
        attributes.insert(name.to_string(), AttrValue::Str(value));
    }

    // live form state overrides the markup-declared representation
    let mut force_empty_children = false;
    match capture_control_value(tree, id) {
        Some(ControlValue::Text(value)) => {
            let value = redact_input_value(config, element, &value);
            attributes.insert("value".to_string(), AttrValue::Str(value));
            if matches!(
                domcast_dom::control_kind(&element.tag_name, element.get_attr("type")),
                Some(ControlKind::TextEntry | ControlKind::TextArea)
            ) {
                // the live value must not be duplicated by static text
                force_empty_children = true;
            }
        }
        Some(ControlValue::Checked(checked)) => {
            attributes.insert("checked".to_string(), AttrValue::Bool(checked));
        }
        Some(ControlValue::Selected(selected)) => {
            attributes.insert("selected".to_string(), AttrValue::Bool(selected));
        }
        None => {}
    }

    if !config.new_element {
        if let Some((top, left)) = capture_scroll(tree, id) {
            attributes.insert(SCROLL_TOP_ATTR.to_string(), AttrValue::Num(top));
            attributes.insert(SCROLL_LEFT_ATTR.to_string(), AttrValue::Num(left));
        }
    }

    // stylesheet special case: a style host with exactly one text child
    // serializes one resolved text node carrying the effective rules
    let mut child_nodes = Vec::new();
    let mut synthesized = false;
    if tag_name == "style" && !skip_children && !force_empty_children {
        let children = tree.children(id);
        // without a rule-introspection capability the static text is
        // already the effective content; ordinary recursion rewrites it
        if children.len() == 1
            && tree.get(children[0]).is_some_and(|n| n.is_text())
            && element.stylesheet.is_some()
        {
            match tree.effective_style_text(id) {
                Some(css) => {
                    let resolved = if config.inline_stylesheet {
                        absolutize_urls(&css, &config.base_href)
                    } else {
                        css
                    };
                    let text_id = mirror.id_for(children[0]);
                    child_nodes.push(SerializedNode {
                        id: text_id,
                        data: SerializedNodeData::Text {
                            text: resolved,
                            is_style: true,
                            is_script: false,
                        },
                    });
                    synthesized = true;
                }
                None => {
                    tracing::warn!("Style rules inaccessible; falling back to static text");
                }
            }
        }
    }

    if !skip_children && !synthesized && !force_empty_children {
        child_nodes = serialize_children(tree, id, mirror, config);
    }

    let shadow = element
        .shadow_root
        .and_then(|root| serialize_with(tree, root, mirror, config, false))
        .map(Box::new);

    Some(SerializedNode {
        id: sid,
        data: SerializedNodeData::Element {
            tag_name,
            attributes,
            child_nodes,
            is_svg,
            is_custom,
            needs_block: false,
            shadow,
        },
    })
}

fn redact_input_value(config: &SnapshotConfig, element: &ElementData, value: &str) -> String {
    let is_password = element
        .get_attr("type")
        .is_some_and(|t| t.eq_ignore_ascii_case("password"));
    if is_password || config.mask_all_inputs {
        return match &config.mask_input_fn {
            Some(redact) => redact(value),
            None => "*".repeat(value.chars().count()),
        };
    }
    value.to_string()
}

fn serialize_text(
    tree: &DomTree,
    id: NodeId,
    mirror: &mut Mirror,
    config: &SnapshotConfig,
) -> Option<SerializedNode> {
    let sid = mirror.id_for(id);
    let text = tree.get(id)?.as_text()?;
    let parent = tree.nearest_element(id);
    let parent_tag = parent
        .and_then(|p| tree.as_element(p))
        .map(|e| e.tag_name.to_ascii_lowercase());
    let is_style = parent_tag.as_deref() == Some("style");
    let is_script = parent_tag.as_deref() == Some("script");

    let mut content = text.to_string();
    if is_style {
        if config.inline_stylesheet {
            content = absolutize_urls(&content, &config.base_href);
        }
    } else if is_script {
        // script text is never masked; slim output elides it entirely
        if config.slim.script {
            content = String::new();
        }
    } else if !content.trim().is_empty() {
        // whitespace-only text is not sensitive by construction
        if let Some(parent) = parent {
            if needs_masking(
                tree,
                parent,
                &config.mask_text_class,
                config.mask_text_selector.as_ref(),
                config.allow_list.as_ref(),
                config.check_ancestors_for_mask,
            ) {
                content = match &config.mask_text_fn {
                    Some(redact) => redact(&content),
                    None => default_mask_text(&content),
                };
            }
        }
    }

    Some(SerializedNode {
        id: sid,
        data: SerializedNodeData::Text {
            text: content,
            is_style,
            is_script,
        },
    })
}
