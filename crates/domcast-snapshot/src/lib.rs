//! domcast snapshot - Live tree to portable snapshot
//!
//! Recursive transducer turning a host document tree into a JSON-safe
//! snapshot tree: stable node identities (Mirror), layered privacy policy
//! (blocking and masking with an overriding allow-list), quote-aware
//! stylesheet URL rewriting, and transient runtime-state capture (scroll
//! offsets, live form values).

mod block;
mod capture;
mod config;
mod css;
mod mask;
mod matcher;
mod mirror;
mod serialize;
mod types;

pub use block::is_blocked;
pub use capture::{capture_control_value, capture_scroll, ControlValue};
pub use config::{
    ConfigError, MaskInputFn, MaskTextFn, SlimOptions, SnapshotConfig, SnapshotConfigBuilder,
};
pub use css::{absolutize_urls, is_data_url};
pub use mask::{default_mask_text, needs_masking};
pub use matcher::ClassMatcher;
pub use mirror::Mirror;
pub use serialize::{serialize_node, snapshot};
pub use types::{
    AttrValue, SerializedNode, SerializedNodeData, HEIGHT_ATTR, SCROLL_LEFT_ATTR, SCROLL_TOP_ATTR,
    WIDTH_ATTR,
};
