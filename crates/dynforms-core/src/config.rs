//! Form configuration and markup defaults

use serde::{Deserialize, Serialize};

/// Default prefix of every rendered field id/name
pub const DEFAULT_FIELD_PREFIX: &str = "DynField_";

/// Name and id of the hidden input carrying the form snapshot
pub const SERIALIZED_FORM_FIELD: &str = "DynSerializedForm";

/// Default variable name assigned by the client data script
pub const DEFAULT_DATA_SCRIPT_VAR: &str = "DynFieldData";

/// Css classes used by the default templates and renderers
pub mod classes {
    pub const FORM: &str = "DynForm";
    pub const FIELD_WRAPPER: &str = "DynFieldWrapper";
    pub const PROMPT: &str = "DynFieldPrompt";
    pub const CHECKBOX_PROMPT: &str = "DynCheckboxPrompt";
    pub const ERROR: &str = "DynFieldError";
    pub const LIST_INPUT_LABEL: &str = "DynListFieldInputLabel";
    pub const VERTICAL: &str = "DynVertical";
    pub const HORIZONTAL: &str = "DynHorizontal";
    pub const ORIENTABLE_LIST: &str = "DynOrientableList";
}

/// Form-level settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Prepended to every field key to build element ids and names
    pub field_prefix: String,
    /// Embed a snapshot of the form when rendering
    pub serialize: bool,
    /// Variable name assigned by the client data script
    pub data_script_var: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            field_prefix: DEFAULT_FIELD_PREFIX.into(),
            serialize: false,
            data_script_var: DEFAULT_DATA_SCRIPT_VAR.into(),
        }
    }
}
