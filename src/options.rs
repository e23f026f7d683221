//! Generation settings.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Knobs controlling schema shape. Field names follow the camelCase option
/// names used in options files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Options {
    /// Emit `$ref` + `definitions` for named types instead of inlining them.
    pub use_ref: bool,
    /// Extend `$ref` emission to type aliases.
    pub use_type_alias_ref: bool,
    /// Ref-wrap the requested root type as well.
    pub use_root_ref: bool,
    /// Stamp `title` on every registry definition.
    pub use_title: bool,
    /// Add an empty `defaultProperties` placeholder to object schemas.
    pub use_default_properties: bool,
    /// Default `additionalProperties` to `false`.
    pub disable_extra_properties: bool,
    /// Emit `propertyOrder` on object schemas.
    pub use_property_order: bool,
    /// Emit `{"typeof": "function"}` for function types.
    pub use_type_of_keyword: bool,
    /// Compute `required` on object schemas.
    pub generate_required: bool,
    /// Expected null inference mode of the front end.
    pub strict_null_checks: bool,
    /// Generate even when the front end reported diagnostics.
    pub ignore_errors: bool,
    /// Extra annotation names treated as validation keywords.
    pub validation_keywords: Vec<String>,
    pub out: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            use_ref: true,
            use_type_alias_ref: false,
            use_root_ref: false,
            use_title: false,
            use_default_properties: false,
            disable_extra_properties: false,
            use_property_order: false,
            use_type_of_keyword: false,
            generate_required: false,
            strict_null_checks: false,
            ignore_errors: false,
            validation_keywords: Vec::new(),
            out: None,
        }
    }
}
