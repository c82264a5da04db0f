//! Blocking Engine
//!
//! Decides whether an entire subtree is redacted. The allow-list wins
//! over everything: a match on the element or any ancestor suppresses
//! blocking. Only the element itself is tested for the block condition;
//! subtree pruning is the serializer's recursion rule, not propagation.

use crate::matcher::ClassMatcher;
use domcast_dom::{DomTree, NodeId, Selector};

/// Check whether an element's subtree must be replaced by a placeholder
pub fn is_blocked(
    tree: &DomTree,
    id: NodeId,
    block_class: &ClassMatcher,
    block_selector: Option<&Selector>,
    allow_list: Option<&Selector>,
) -> bool {
    let Some(element) = tree.as_element(id) else {
        return false;
    };

    // allow-list first: self, then every ancestor to the root
    if let Some(allow) = allow_list {
        if allow.matches(tree, id) || tree.ancestors(id).any(|a| allow.matches(tree, a)) {
            return false;
        }
    }

    if let Some(class_attr) = element.class_attr() {
        if block_class.matches_class_list(class_attr) {
            return true;
        }
    }
    if let Some(selector) = block_selector {
        if selector.matches(tree, id) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker() -> ClassMatcher {
        ClassMatcher::literal("rr-block")
    }

    #[test]
    fn test_class_marker_blocks() {
        let mut tree = DomTree::new();
        let el = tree.create_element("div");
        tree.as_element_mut(el).unwrap().set_attr("class", "rr-block");

        assert!(is_blocked(&tree, el, &marker(), None, None));
    }

    #[test]
    fn test_selector_blocks() {
        let mut tree = DomTree::new();
        let el = tree.create_element("iframe");

        let sel = Selector::parse("iframe").unwrap();
        assert!(is_blocked(&tree, el, &marker(), Some(&sel), None));
        assert!(!is_blocked(&tree, el, &marker(), None, None));
    }

    #[test]
    fn test_allow_list_wins_on_self() {
        let mut tree = DomTree::new();
        let el = tree.create_element("div");
        tree.as_element_mut(el)
            .unwrap()
            .set_attr("class", "rr-block keep");

        let allow = Selector::parse(".keep").unwrap();
        assert!(!is_blocked(&tree, el, &marker(), None, Some(&allow)));
    }

    #[test]
    fn test_allow_list_wins_on_ancestor() {
        let mut tree = DomTree::new();
        let parent = tree.create_element("section");
        let el = tree.create_element("div");
        tree.append_child(tree.root(), parent);
        tree.append_child(parent, el);
        tree.as_element_mut(parent).unwrap().set_attr("class", "keep");
        tree.as_element_mut(el).unwrap().set_attr("class", "rr-block");

        let allow = Selector::parse(".keep").unwrap();
        assert!(!is_blocked(&tree, el, &marker(), None, Some(&allow)));
    }

    #[test]
    fn test_blocking_does_not_propagate_from_ancestors() {
        let mut tree = DomTree::new();
        let parent = tree.create_element("div");
        let child = tree.create_element("span");
        tree.append_child(tree.root(), parent);
        tree.append_child(parent, child);
        tree.as_element_mut(parent).unwrap().set_attr("class", "rr-block");

        assert!(is_blocked(&tree, parent, &marker(), None, None));
        // the child itself does not test as blocked
        assert!(!is_blocked(&tree, child, &marker(), None, None));
    }

    #[test]
    fn test_non_element_never_blocked() {
        let mut tree = DomTree::new();
        let text = tree.create_text("hi");
        assert!(!is_blocked(&tree, text, &marker(), None, None));
    }
}
