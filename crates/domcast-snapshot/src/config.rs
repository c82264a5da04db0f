//! Snapshot configuration
//!
//! Explicit option set with documented defaults. All pattern and
//! selector parsing happens in `build()`, so a snapshot walk can never
//! fail partway through and leave a half-built tree inconsistent with
//! the mirror's id assignments.

use crate::matcher::ClassMatcher;
use domcast_dom::{Selector, SelectorError};

/// Caller-supplied text redaction override
pub type MaskTextFn = Box<dyn Fn(&str) -> String>;
/// Caller-supplied input-value redaction override
pub type MaskInputFn = Box<dyn Fn(&str) -> String>;

/// Configuration error, reported at build time only
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {role} selector: {source}")]
    Selector {
        role: &'static str,
        source: SelectorError,
    },

    #[error("invalid {role} pattern: {source}")]
    Pattern {
        role: &'static str,
        source: regex::Error,
    },
}

/// Slim-output options: drop noise the replay side does not need
#[derive(Debug, Clone, Copy, Default)]
pub struct SlimOptions {
    /// Elide script text (the node stays, flagged, with empty text)
    pub script: bool,
    /// Drop comment nodes entirely
    pub comment: bool,
}

/// Options for one snapshot invocation
pub struct SnapshotConfig {
    /// Base href of the document, used for URL rewriting
    pub base_href: String,
    /// Marker class that blocks a subtree (default literal "rr-block")
    pub block_class: ClassMatcher,
    /// Additional selector that blocks a subtree
    pub block_selector: Option<Selector>,
    /// Marker class that masks text (default literal "rr-mask")
    pub mask_text_class: ClassMatcher,
    /// Additional selector that masks text
    pub mask_text_selector: Option<Selector>,
    /// Selector suppressing both blocking and masking (self or ancestor)
    pub allow_list: Option<Selector>,
    /// Whether mask matching climbs the ancestor chain (default true)
    pub check_ancestors_for_mask: bool,
    /// Redact every text-entry value, not just password inputs
    pub mask_all_inputs: bool,
    /// Override for text redaction (default: '*' per non-whitespace char)
    pub mask_text_fn: Option<MaskTextFn>,
    /// Override for input-value redaction
    pub mask_input_fn: Option<MaskInputFn>,
    /// Rewrite url(...) references in style text (default true)
    pub inline_stylesheet: bool,
    /// Do not recurse below the entry node
    pub skip_child_nodes: bool,
    /// Slim-output options
    pub slim: SlimOptions,
    /// The entry node was just added; scroll synthetics are meaningless
    pub new_element: bool,
}

impl SnapshotConfig {
    /// Defaults for a document at `base_href`
    pub fn new(base_href: impl Into<String>) -> Self {
        Self {
            base_href: base_href.into(),
            block_class: ClassMatcher::literal("rr-block"),
            block_selector: None,
            mask_text_class: ClassMatcher::literal("rr-mask"),
            mask_text_selector: None,
            allow_list: None,
            check_ancestors_for_mask: true,
            mask_all_inputs: false,
            mask_text_fn: None,
            mask_input_fn: None,
            inline_stylesheet: true,
            skip_child_nodes: false,
            slim: SlimOptions::default(),
            new_element: false,
        }
    }

    /// Start building a config from string-form matchers
    pub fn builder(base_href: impl Into<String>) -> SnapshotConfigBuilder {
        SnapshotConfigBuilder::new(base_href)
    }
}

enum ClassSpec {
    Literal(String),
    Pattern(String),
}

impl ClassSpec {
    fn build(self, role: &'static str) -> Result<ClassMatcher, ConfigError> {
        match self {
            Self::Literal(token) => Ok(ClassMatcher::literal(token)),
            Self::Pattern(source) => {
                ClassMatcher::pattern(&source).map_err(|source| ConfigError::Pattern { role, source })
            }
        }
    }
}

fn parse_selector(
    source: Option<String>,
    role: &'static str,
) -> Result<Option<Selector>, ConfigError> {
    source
        .map(|s| Selector::parse(&s).map_err(|source| ConfigError::Selector { role, source }))
        .transpose()
}

/// Builder validating every matcher up front
pub struct SnapshotConfigBuilder {
    base_href: String,
    block_class: ClassSpec,
    block_selector: Option<String>,
    mask_text_class: ClassSpec,
    mask_text_selector: Option<String>,
    allow_list: Option<String>,
    check_ancestors_for_mask: bool,
    mask_all_inputs: bool,
    mask_text_fn: Option<MaskTextFn>,
    mask_input_fn: Option<MaskInputFn>,
    inline_stylesheet: bool,
    skip_child_nodes: bool,
    slim: SlimOptions,
    new_element: bool,
}

impl SnapshotConfigBuilder {
    fn new(base_href: impl Into<String>) -> Self {
        Self {
            base_href: base_href.into(),
            block_class: ClassSpec::Literal("rr-block".to_string()),
            block_selector: None,
            mask_text_class: ClassSpec::Literal("rr-mask".to_string()),
            mask_text_selector: None,
            allow_list: None,
            check_ancestors_for_mask: true,
            mask_all_inputs: false,
            mask_text_fn: None,
            mask_input_fn: None,
            inline_stylesheet: true,
            skip_child_nodes: false,
            slim: SlimOptions::default(),
            new_element: false,
        }
    }

    /// Block-marker class as a literal token
    pub fn block_class(mut self, token: impl Into<String>) -> Self {
        self.block_class = ClassSpec::Literal(token.into());
        self
    }

    /// Block-marker class as a pattern over the class attribute
    pub fn block_class_pattern(mut self, source: impl Into<String>) -> Self {
        self.block_class = ClassSpec::Pattern(source.into());
        self
    }

    /// Additional blocking selector
    pub fn block_selector(mut self, selector: impl Into<String>) -> Self {
        self.block_selector = Some(selector.into());
        self
    }

    /// Mask-marker class as a literal token
    pub fn mask_text_class(mut self, token: impl Into<String>) -> Self {
        self.mask_text_class = ClassSpec::Literal(token.into());
        self
    }

    /// Mask-marker class as a pattern over the class attribute
    pub fn mask_text_class_pattern(mut self, source: impl Into<String>) -> Self {
        self.mask_text_class = ClassSpec::Pattern(source.into());
        self
    }

    /// Additional masking selector
    pub fn mask_text_selector(mut self, selector: impl Into<String>) -> Self {
        self.mask_text_selector = Some(selector.into());
        self
    }

    /// Allow-list selector suppressing blocking and masking
    pub fn allow_list(mut self, selector: impl Into<String>) -> Self {
        self.allow_list = Some(selector.into());
        self
    }

    /// Whether mask matching climbs the ancestor chain
    pub fn check_ancestors_for_mask(mut self, check: bool) -> Self {
        self.check_ancestors_for_mask = check;
        self
    }

    /// Redact every text-entry value
    pub fn mask_all_inputs(mut self, mask: bool) -> Self {
        self.mask_all_inputs = mask;
        self
    }

    /// Override text redaction
    pub fn mask_text_fn(mut self, f: MaskTextFn) -> Self {
        self.mask_text_fn = Some(f);
        self
    }

    /// Override input-value redaction
    pub fn mask_input_fn(mut self, f: MaskInputFn) -> Self {
        self.mask_input_fn = Some(f);
        self
    }

    /// Rewrite url(...) references in style text
    pub fn inline_stylesheet(mut self, inline: bool) -> Self {
        self.inline_stylesheet = inline;
        self
    }

    /// Do not recurse below the entry node
    pub fn skip_child_nodes(mut self, skip: bool) -> Self {
        self.skip_child_nodes = skip;
        self
    }

    /// Slim-output options
    pub fn slim(mut self, slim: SlimOptions) -> Self {
        self.slim = slim;
        self
    }

    /// Mark the entry node as newly added
    pub fn new_element(mut self, new: bool) -> Self {
        self.new_element = new;
        self
    }

    /// Validate all matchers and produce the config
    pub fn build(self) -> Result<SnapshotConfig, ConfigError> {
        Ok(SnapshotConfig {
            base_href: self.base_href,
            block_class: self.block_class.build("block class")?,
            block_selector: parse_selector(self.block_selector, "block")?,
            mask_text_class: self.mask_text_class.build("mask class")?,
            mask_text_selector: parse_selector(self.mask_text_selector, "mask")?,
            allow_list: parse_selector(self.allow_list, "allow-list")?,
            check_ancestors_for_mask: self.check_ancestors_for_mask,
            mask_all_inputs: self.mask_all_inputs,
            mask_text_fn: self.mask_text_fn,
            mask_input_fn: self.mask_input_fn,
            inline_stylesheet: self.inline_stylesheet,
            skip_child_nodes: self.skip_child_nodes,
            slim: self.slim,
            new_element: self.new_element,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SnapshotConfig::new("http://localhost/");
        assert!(config.check_ancestors_for_mask);
        assert!(config.inline_stylesheet);
        assert!(!config.mask_all_inputs);
        assert!(!config.skip_child_nodes);
        assert!(config.allow_list.is_none());
    }

    #[test]
    fn test_builder_roundtrip() {
        let config = SnapshotConfig::builder("http://localhost/")
            .block_selector("iframe, .ad")
            .mask_text_class_pattern("^pii-")
            .allow_list(".public")
            .mask_all_inputs(true)
            .build()
            .unwrap();

        assert!(config.block_selector.is_some());
        assert!(config.allow_list.is_some());
        assert!(config.mask_all_inputs);
        assert!(matches!(config.mask_text_class, ClassMatcher::Pattern(_)));
    }

    #[test]
    fn test_bad_pattern_fails_at_build() {
        let err = SnapshotConfig::builder("http://localhost/")
            .mask_text_class_pattern("(oops")
            .build()
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { role: "mask class", .. }));
    }

    #[test]
    fn test_bad_selector_fails_at_build() {
        let err = SnapshotConfig::builder("http://localhost/")
            .block_selector("div >")
            .build()
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Selector { role: "block", .. }));
    }
}
