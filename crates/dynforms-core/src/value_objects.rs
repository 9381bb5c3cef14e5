//! Value objects: choices, attached data, responses, uploaded files

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// A single selectable choice of a list field
///
/// Two items are equal when their text and value are equal, regardless of
/// selection state and attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListItem {
    pub text: String,
    pub value: String,
    #[serde(default)]
    pub selected: bool,
    /// Attributes rendered on this choice's input element
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl ListItem {
    /// Choice whose text doubles as its value
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::with_text(value.clone(), value)
    }

    /// Choice with distinct text and value
    pub fn with_text(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            selected: false,
            attributes: BTreeMap::new(),
        }
    }

    /// Mark as selected
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Add an html attribute
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Text: {}; Value: {}]", self.text, self.value)
    }
}

impl PartialEq for ListItem {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.value == other.value
    }
}

impl Eq for ListItem {}

impl Hash for ListItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.value.hash(state);
    }
}

/// Arbitrary data attached to a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataItem {
    pub value: serde_json::Value,
    /// Whether the value is exposed to the client data script
    #[serde(default)]
    pub client_side: bool,
}

impl DataItem {
    pub fn new(value: serde_json::Value, client_side: bool) -> Self {
        Self { value, client_side }
    }
}

/// The end user's answer to one input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub title: String,
    pub value: String,
}

/// Handle to an uploaded file
///
/// Only metadata travels through the engine; storing the bytes is up to the
/// host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedFile {
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: u64,
}

impl PostedFile {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            size: 0,
        }
    }

    /// Extension with its leading dot, e.g. `.pdf`
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
    }
}

/// Layout direction of a list of choices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_list_item_structural_equality() {
        let a = ListItem::with_text("Red", "r");
        let b = ListItem::with_text("Red", "r")
            .selected(true)
            .attribute("data-x", "1");
        assert_eq!(a, b);
        assert_ne!(a, ListItem::with_text("Red", "red"));

        let set: HashSet<_> = vec![a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_list_item_display() {
        assert_eq!(ListItem::new("Blue").to_string(), "[Text: Blue; Value: Blue]");
    }

    #[test]
    fn test_posted_file_extension() {
        assert_eq!(PostedFile::new("cv.PDF").extension().as_deref(), Some(".PDF"));
        assert_eq!(PostedFile::new("archive.tar.gz").extension().as_deref(), Some(".gz"));
        assert_eq!(PostedFile::new("README").extension(), None);
    }
}
