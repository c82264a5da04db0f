//! Stylesheet capability
//!
//! Effective rule text for style-hosting elements. Rules inserted
//! programmatically show up here even when the static source text does
//! not contain them; an inaccessible sheet (cross-origin) yields None
//! and callers fall back to static text.

/// Effective style rules attached to a style-hosting element
#[derive(Debug, Clone)]
pub struct StyleSheet {
    /// Rule texts in effective order
    pub rules: Vec<String>,
    /// False when the host denies rule introspection
    pub accessible: bool,
}

impl StyleSheet {
    /// An accessible sheet from its current rules
    pub fn from_rules(rules: Vec<String>) -> Self {
        Self {
            rules,
            accessible: true,
        }
    }

    /// A sheet whose rules cannot be read
    pub fn inaccessible() -> Self {
        Self {
            rules: Vec::new(),
            accessible: false,
        }
    }

    /// Insert a rule at the end of the effective list
    pub fn insert_rule(&mut self, rule: impl Into<String>) {
        self.rules.push(rule.into());
    }

    /// The currently-effective rule text, None when not accessible
    pub fn effective_css(&self) -> Option<String> {
        if !self.accessible {
            return None;
        }
        Some(self.rules.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_css() {
        let mut sheet = StyleSheet::from_rules(vec!["a { color: red; }".into()]);
        sheet.insert_rule("b { color: blue; }");

        assert_eq!(
            sheet.effective_css().unwrap(),
            "a { color: red; }b { color: blue; }"
        );
    }

    #[test]
    fn test_inaccessible() {
        let sheet = StyleSheet::inaccessible();
        assert_eq!(sheet.effective_css(), None);
    }
}
