//! Error types for DynForms

use thiserror::Error;

/// DynForms error type
///
/// These are programmer or boundary errors surfaced immediately to the
/// caller. A field failing validation is not an error: it is recorded on the
/// field and reported through `Form::validate`.
#[derive(Error, Debug)]
pub enum FormError {
    /// Field key is empty
    #[error("field keys cannot be empty")]
    InvalidKey,

    /// Field key collides with another field of the same form
    #[error("the key \"{0}\" is in use by another field")]
    DuplicateKey(String),

    /// Form prefix + field key is not a valid HTML id
    #[error("\"{0}\" is not a valid HTML id: it must begin with a letter and contain only letters, digits, hyphens and underscores")]
    InvalidHtmlId(String),

    /// Operation needs a field attached to a form
    #[error("field \"{0}\" is not attached to a form")]
    Detached(String),

    /// Field is attached; its key must be changed through the field list
    #[error("field \"{0}\" is attached to a form; change its key through FieldList::rekey")]
    Attached(String),

    /// No form instance could be obtained while rebinding
    #[error("the dynamic form was not found; include the SerializedForm placeholder in the form template or pass a form instance")]
    FormNotFound,

    /// No field with the given key
    #[error("no field with key \"{0}\"")]
    UnknownField(String),

    /// Index outside the field list
    #[error("index {index} out of bounds for field list of length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Current length
        len: usize,
    },

    /// Regular expression does not compile
    #[error("invalid regular expression: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// JSON error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot is not valid base64
    #[error("invalid form snapshot: {0}")]
    InvalidSnapshot(#[from] base64::DecodeError),

    /// Markup could not be formatted
    #[error("malformed markup: {0}")]
    MalformedMarkup(String),
}

/// Result type for DynForms
pub type Result<T> = std::result::Result<T, FormError>;
