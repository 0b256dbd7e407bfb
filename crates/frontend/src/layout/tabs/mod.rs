//! Tab management
//!
//! - `page`: TabPage wrapper showing or hiding a tab's content
//! - `registry`: tab.key -> View, the only place tab keys are resolved
//! - `tab_labels`: tab titles and parsing of parameterized keys

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{property_edit_key, tab_label_for_key, TabRoute};

/// Tab opened for unknown keys and stale wizard steps
pub const NOT_FOUND_KEY: &str = "not_found";
