//! Runtime-State Capture
//!
//! Pure reads of transient state that static markup cannot express:
//! scroll offsets and the live value/checked/selected state of form
//! controls (so in-progress edits are reflected).

use domcast_dom::{control_kind, ControlKind, DomTree, NodeId};

/// Live state of a form control at capture time
#[derive(Debug, Clone, PartialEq)]
pub enum ControlValue {
    /// Current text value (input, textarea, select)
    Text(String),
    /// Current checked state (checkbox, radio)
    Checked(bool),
    /// Current selected state (option)
    Selected(bool),
}

/// Live scroll offsets as (top, left), present only when non-zero
pub fn capture_scroll(tree: &DomTree, id: NodeId) -> Option<(f64, f64)> {
    let geometry = &tree.as_element(id)?.geometry;
    if !geometry.has_scroll() {
        return None;
    }
    Some((geometry.scroll_top, geometry.scroll_left))
}

/// Live value of a form control, None for non-controls
///
/// Falls back to the markup-declared state when no live state exists.
pub fn capture_control_value(tree: &DomTree, id: NodeId) -> Option<ControlValue> {
    let element = tree.as_element(id)?;
    let kind = control_kind(&element.tag_name, element.get_attr("type"))?;

    match kind {
        ControlKind::TextEntry | ControlKind::TextArea | ControlKind::Select => {
            let value = element
                .form
                .as_ref()
                .and_then(|f| f.value.clone())
                .or_else(|| element.get_attr("value").map(str::to_string))
                .unwrap_or_default();
            Some(ControlValue::Text(value))
        }
        ControlKind::Checkable => {
            let checked = element
                .form
                .as_ref()
                .and_then(|f| f.checked)
                .unwrap_or_else(|| element.get_attr("checked").is_some());
            Some(ControlValue::Checked(checked))
        }
        ControlKind::SelectOption => {
            let selected = element
                .form
                .as_ref()
                .and_then(|f| f.selected)
                .unwrap_or_else(|| element.get_attr("selected").is_some());
            Some(ControlValue::Selected(selected))
        }
    }
}
