//! Class matchers
//!
//! Policy marker classes are either a literal class token or a pattern
//! tested against the whole class attribute. Engines only see the one
//! uniform matching operation.

use regex::Regex;

/// Literal-or-pattern class matcher
#[derive(Debug, Clone)]
pub enum ClassMatcher {
    /// Exact class-token membership
    Literal(String),
    /// Pattern tested against the full class-attribute string
    Pattern(Regex),
}

impl ClassMatcher {
    /// A literal class-token matcher
    pub fn literal(token: impl Into<String>) -> Self {
        Self::Literal(token.into())
    }

    /// A pattern matcher; invalid patterns fail here, at configuration time
    pub fn pattern(source: &str) -> Result<Self, regex::Error> {
        Ok(Self::Pattern(Regex::new(source)?))
    }

    /// Test against an element's full class attribute
    pub fn matches_class_list(&self, class_attr: &str) -> bool {
        match self {
            Self::Literal(token) => class_attr.split_whitespace().any(|c| c == token),
            Self::Pattern(re) => re.is_match(class_attr),
        }
    }
}
