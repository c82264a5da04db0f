//! Masking Engine
//!
//! Decides whether text within an element must be redacted. The
//! allow-list check always walks the full ancestor chain, independent of
//! `check_ancestors`; the mask condition itself only climbs when asked.
//! Pure functions of the tree at the moment of the call.

use crate::matcher::ClassMatcher;
use domcast_dom::{DomTree, NodeId, Selector};

fn matches_mask(
    tree: &DomTree,
    id: NodeId,
    mask_class: &ClassMatcher,
    mask_selector: Option<&Selector>,
) -> bool {
    let Some(element) = tree.as_element(id) else {
        return false;
    };
    if let Some(class_attr) = element.class_attr() {
        if mask_class.matches_class_list(class_attr) {
            return true;
        }
    }
    mask_selector.is_some_and(|s| s.matches(tree, id))
}

/// Check whether text under an element must be redacted
pub fn needs_masking(
    tree: &DomTree,
    id: NodeId,
    mask_class: &ClassMatcher,
    mask_selector: Option<&Selector>,
    allow_list: Option<&Selector>,
    check_ancestors: bool,
) -> bool {
    if tree.as_element(id).is_none() {
        return false;
    }

    // allow-list first: self, then every ancestor to the root,
    // regardless of check_ancestors
    if let Some(allow) = allow_list {
        if allow.matches(tree, id) || tree.ancestors(id).any(|a| allow.matches(tree, a)) {
            return false;
        }
    }

    if matches_mask(tree, id, mask_class, mask_selector) {
        return true;
    }
    if check_ancestors {
        return tree
            .ancestors(id)
            .any(|a| matches_mask(tree, a, mask_class, mask_selector));
    }
    false
}

/// Default redaction: every non-whitespace character becomes '*'
///
/// Length- and whitespace-invariant so masked replay keeps layout.
pub fn default_mask_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { c } else { '*' })
        .collect()
}
