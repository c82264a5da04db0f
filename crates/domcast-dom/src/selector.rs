//! Policy selector matching
//!
//! Compound selectors for block/mask/allow-list policy: `*`, tag, `#id`,
//! `.class`, and attribute forms, comma-separated into a list. A list
//! matches an element when any compound matches the element itself;
//! combinators are not part of the policy surface.

use crate::{DomTree, NodeId};

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("invalid selector syntax near '{0}'")]
    Syntax(String),
}

/// A parsed selector list
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

/// One compound selector (e.g. `input.secret[type=password]`)
#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq)]
enum Part {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Tag(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attr(AttrSelector),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttrSelector {
    pub name: String,
    pub matcher: Option<AttrMatcher>,
}

/// Attribute value matcher
#[derive(Debug, Clone, PartialEq)]
pub enum AttrMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    TokenContains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttrSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        match (&self.matcher, value) {
            (None, Some(_)) => true,
            (_, None) => false,
            (Some(matcher), Some(val)) => match matcher {
                AttrMatcher::Exact(expected) => val == expected,
                AttrMatcher::TokenContains(expected) => {
                    val.split_whitespace().any(|w| w == expected)
                }
                AttrMatcher::DashMatch(expected) => {
                    val == expected || val.starts_with(&format!("{}-", expected))
                }
                AttrMatcher::Prefix(expected) => val.starts_with(expected.as_str()),
                AttrMatcher::Suffix(expected) => val.ends_with(expected.as_str()),
                AttrMatcher::Substring(expected) => val.contains(expected.as_str()),
            },
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl Selector {
    /// Parse a comma-separated selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        if input.trim().is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut compounds = Vec::new();
        for piece in input.split(',') {
            let piece = piece.trim();
            if piece.is_empty() {
                return Err(SelectorError::Syntax(input.to_string()));
            }
            compounds.push(Self::parse_compound(piece)?);
        }

        Ok(Self { compounds })
    }

    fn parse_compound(piece: &str) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let chars: Vec<char> = piece.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '*' => {
                    compound.parts.push(Part::Universal);
                    i += 1;
                }
                '#' => {
                    let (ident, next) = Self::read_ident(&chars, i + 1, piece)?;
                    compound.parts.push(Part::Id(ident));
                    i = next;
                }
                '.' => {
                    let (ident, next) = Self::read_ident(&chars, i + 1, piece)?;
                    compound.parts.push(Part::Class(ident));
                    i = next;
                }
                '[' => {
                    let close = chars[i..]
                        .iter()
                        .position(|&c| c == ']')
                        .ok_or_else(|| SelectorError::Syntax(piece.to_string()))?;
                    let inner: String = chars[i + 1..i + close].iter().collect();
                    compound.parts.push(Part::Attr(Self::parse_attr(&inner, piece)?));
                    i += close + 1;
                }
                c if is_ident_char(c) => {
                    // type selector is only valid at the start of a compound
                    if !compound.parts.is_empty() {
                        return Err(SelectorError::Syntax(piece.to_string()));
                    }
                    let (ident, next) = Self::read_ident(&chars, i, piece)?;
                    compound.parts.push(Part::Tag(ident));
                    i = next;
                }
                _ => return Err(SelectorError::Syntax(piece.to_string())),
            }
        }

        if compound.parts.is_empty() {
            return Err(SelectorError::Syntax(piece.to_string()));
        }
        Ok(compound)
    }

    fn read_ident(
        chars: &[char],
        start: usize,
        piece: &str,
    ) -> Result<(String, usize), SelectorError> {
        let mut end = start;
        while end < chars.len() && is_ident_char(chars[end]) {
            end += 1;
        }
        if end == start {
            return Err(SelectorError::Syntax(piece.to_string()));
        }
        Ok((chars[start..end].iter().collect(), end))
    }

    fn parse_attr(inner: &str, piece: &str) -> Result<AttrSelector, SelectorError> {
        let inner = inner.trim();
        if inner.is_empty() {
            return Err(SelectorError::Syntax(piece.to_string()));
        }

        // longest operators first so '=' does not shadow '~=' etc.
        for (op, build) in [
            ("~=", AttrMatcher::TokenContains as fn(String) -> AttrMatcher),
            ("|=", AttrMatcher::DashMatch),
            ("^=", AttrMatcher::Prefix),
            ("$=", AttrMatcher::Suffix),
            ("*=", AttrMatcher::Substring),
            ("=", AttrMatcher::Exact),
        ] {
            if let Some(pos) = inner.find(op) {
                let name = inner[..pos].trim();
                let mut value = inner[pos + op.len()..].trim();
                if (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
                    || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2)
                {
                    value = &value[1..value.len() - 1];
                }
                if name.is_empty() || !name.chars().all(is_ident_char) {
                    return Err(SelectorError::Syntax(piece.to_string()));
                }
                return Ok(AttrSelector {
                    name: name.to_string(),
                    matcher: Some(build(value.to_string())),
                });
            }
        }

        if !inner.chars().all(is_ident_char) {
            return Err(SelectorError::Syntax(piece.to_string()));
        }
        Ok(AttrSelector {
            name: inner.to_string(),
            matcher: None,
        })
    }

    /// Check if an element matches any compound in the list
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(element) = tree.as_element(id) else {
            return false;
        };
        self.compounds.iter().any(|compound| {
            compound.parts.iter().all(|part| match part {
                Part::Universal => true,
                Part::Tag(tag) => element.tag_name.eq_ignore_ascii_case(tag),
                Part::Id(wanted) => element.id_attr() == Some(wanted.as_str()),
                Part::Class(class) => element.has_class(class),
                Part::Attr(attr) => attr.matches(element.get_attr(&attr.name)),
            })
        })
    }
}
