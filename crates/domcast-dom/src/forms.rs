//! Live form-control state
//!
//! Current value/checked/selected state, mutable independently of the
//! static markup attributes so in-progress edits are observable.

/// Live state of a form control
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Current value (input, textarea, select)
    pub value: Option<String>,
    /// Current checked state (checkbox, radio)
    pub checked: Option<bool>,
    /// Current selected state (option)
    pub selected: Option<bool>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with a current text value
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// State with a current checked flag
    pub fn with_checked(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Default::default()
        }
    }

    /// State with a current selected flag
    pub fn with_selected(selected: bool) -> Self {
        Self {
            selected: Some(selected),
            ..Default::default()
        }
    }
}

/// Kind of form control, for value-capture purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Text-entry input (text, password, email, search, ...)
    TextEntry,
    /// Multi-line text entry
    TextArea,
    /// Checkbox or radio input
    Checkable,
    /// Selection-bearing control
    Select,
    /// An option inside a select
    SelectOption,
}

/// Classify an element as a form control
///
/// `type_attr` is the element's type attribute, if any.
pub fn control_kind(tag_name: &str, type_attr: Option<&str>) -> Option<ControlKind> {
    match tag_name.to_ascii_lowercase().as_str() {
        "input" => match type_attr.map(str::to_ascii_lowercase).as_deref() {
            Some("checkbox") | Some("radio") => Some(ControlKind::Checkable),
            _ => Some(ControlKind::TextEntry),
        },
        "textarea" => Some(ControlKind::TextArea),
        "select" => Some(ControlKind::Select),
        "option" => Some(ControlKind::SelectOption),
        _ => None,
    }
}
