//! Rebinding posted data onto a form

use crate::config::SERIALIZED_FORM_FIELD;
use crate::field::FieldKind;
use crate::form::Form;
use crate::serialization::deserialize_form;
use crate::value_objects::PostedFile;
use crate::{FormError, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// The data of one request: multi-valued form values plus uploaded files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostedData {
    values: BTreeMap<String, Vec<String>>,
    files: BTreeMap<String, PostedFile>,
}

impl PostedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Attach a file under `key`, replacing any previous one
    pub fn insert_file(&mut self, key: impl Into<String>, file: PostedFile) {
        self.files.insert(key.into(), file);
    }

    pub fn with_file(mut self, key: impl Into<String>, file: PostedFile) -> Self {
        self.insert_file(key, file);
        self
    }

    pub fn values(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.values(key).first().map(String::as_str)
    }

    pub fn file(&self, key: &str) -> Option<&PostedFile> {
        self.files.get(key)
    }

    /// Snapshot posted by a serialized form, if any
    pub fn serialized_form(&self) -> Option<&str> {
        self.first(SERIALIZED_FORM_FIELD).filter(|s| !s.is_empty())
    }

    /// Every posted key, values and files alike
    pub fn keys(&self) -> BTreeSet<&str> {
        self.values
            .keys()
            .chain(self.files.keys())
            .map(String::as_str)
            .collect()
    }
}

/// Apply `posted` to `form`, or to the form recovered from the posted
/// snapshot when none is given
///
/// Unknown keys and unknown choice values are ignored. Once every key is
/// applied, upload fields that received a file notify their observers.
pub fn bind(form: Option<Form>, posted: &PostedData) -> Result<Form> {
    let mut form = match form {
        Some(form) => form,
        None => {
            let snapshot = posted.serialized_form().ok_or(FormError::FormNotFound)?;
            deserialize_form(snapshot)?
        }
    };

    let prefix = form.field_prefix().to_string();
    for posted_key in posted.keys() {
        let Some(key) = posted_key.strip_prefix(prefix.as_str()) else {
            continue;
        };
        let Some(mut field) = form.field_mut(key).filter(|f| f.is_input()) else {
            debug!(key = posted_key, "Ignoring posted key without a matching input field");
            continue;
        };

        let values = posted.values(posted_key);
        match field.kind_mut() {
            FieldKind::TextBox(text) | FieldKind::TextArea(text) => text.set_value(values.join(",")),
            FieldKind::Hidden(hidden) => hidden.value = values.join(","),
            FieldKind::CheckBoxList(f) | FieldKind::RadioList(f) => {
                f.list.select_values(values.iter().map(String::as_str))
            }
            FieldKind::Select(f) => f.list.select_values(values.iter().map(String::as_str)),
            FieldKind::CheckBox(check_box) => {
                let first = values.first().map(String::as_str).unwrap_or_default();
                let checked = first.eq_ignore_ascii_case("true");
                if !checked && !first.eq_ignore_ascii_case("false") {
                    warn!(key, value = first, "Unparsable checkbox value, treating as unchecked");
                }
                check_box.checked = checked;
            }
            FieldKind::FileUpload(upload) => upload.set_posted_file(posted.file(posted_key).cloned()),
            FieldKind::Literal(_) => {}
        }
        debug!(key, "Bound posted value");
    }

    form.fire_file_posted();
    Ok(form)
}
