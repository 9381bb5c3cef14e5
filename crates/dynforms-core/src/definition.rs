//! Declarative form definitions
//!
//! Forms described as data (TOML, JSON, a database row) instead of code.
//! A definition carries the common field settings plus the settings of every
//! variant; the ones a variant does not use are ignored.

use crate::config::FormConfig;
use crate::field::{Field, FieldKind, FieldType, ListField};
use crate::form::Form;
use crate::value_objects::{DataItem, ListItem, Orientation};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Choices as `"a,b,c"` or as a list of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choices {
    Delimited(String),
    Items(Vec<ListItem>),
}

impl Choices {
    fn to_items(&self) -> Vec<ListItem> {
        match self {
            Choices::Delimited(text) => {
                let mut list = ListField::new();
                list.add_choices(text, ",");
                list.choices
            }
            Choices::Items(items) => items.clone(),
        }
    }
}

fn default_display() -> bool {
    true
}

fn is_true(b: &bool) -> bool {
    *b
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

/// One field described as data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default = "default_display", skip_serializing_if = "is_true")]
    pub display: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    // input fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_title: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_message: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub input_attributes: BTreeMap<String, String>,

    /// Initial value of a text or hidden field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex_message: Option<String>,

    // list fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Choices>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_delimiter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_option: Option<String>,

    // check box
    #[serde(default, skip_serializing_if = "is_false")]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unchecked_value: Option<String>,

    // file upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_extensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_extension_error: Option<String>,

    // literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, DataItem>,
}

impl Default for FieldDefinition {
    fn default() -> Self {
        Self {
            field_type: None,
            key: None,
            template: None,
            display: true,
            display_order: 0,
            group: None,
            prompt: None,
            response_title: None,
            required: false,
            required_message: None,
            input_attributes: BTreeMap::new(),
            value: None,
            regular_expression: None,
            regex_message: None,
            choices: None,
            response_delimiter: None,
            orientation: None,
            size: None,
            multiple: false,
            empty_option: None,
            checked: false,
            checked_value: None,
            unchecked_value: None,
            valid_extensions: None,
            invalid_extension_error: None,
            html: None,
            data: BTreeMap::new(),
        }
    }
}

impl FieldDefinition {
    /// Definition of a field of type `field_type` with every setting at its default
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Self::default()
        }
    }

    /// Build a detached field
    ///
    /// A missing type means a text box; a missing key gets a generated one.
    pub fn build(&self) -> Result<Field> {
        let field_type = self.field_type.unwrap_or(FieldType::TextBox);
        let mut kind = FieldKind::empty(field_type);

        match &mut kind {
            FieldKind::TextBox(text) | FieldKind::TextArea(text) => {
                if let Some(value) = &self.value {
                    text.set_value(value.as_str());
                }
                text.set_regular_expression(self.regular_expression.as_deref())?;
                if let Some(message) = &self.regex_message {
                    text.regex_message = message.clone();
                }
            }
            FieldKind::CheckBoxList(f) | FieldKind::RadioList(f) => {
                if let Some(orientation) = self.orientation {
                    f.orientation = orientation;
                }
            }
            FieldKind::Select(select) => {
                if let Some(size) = self.size {
                    select.size = size;
                }
                select.multiple = self.multiple;
                if let Some(empty) = &self.empty_option {
                    select.empty_option = Some(empty.clone());
                    select.show_empty_option = true;
                }
            }
            FieldKind::CheckBox(check_box) => {
                check_box.checked = self.checked;
                if let Some(value) = &self.checked_value {
                    check_box.checked_value = value.clone();
                }
                if let Some(value) = &self.unchecked_value {
                    check_box.unchecked_value = value.clone();
                }
            }
            FieldKind::Hidden(hidden) => {
                if let Some(value) = &self.value {
                    hidden.value = value.clone();
                }
            }
            FieldKind::FileUpload(upload) => {
                upload.valid_extensions = self.valid_extensions.clone();
                if let Some(error) = &self.invalid_extension_error {
                    upload.invalid_extension_error = error.clone();
                }
            }
            FieldKind::Literal(literal) => {
                literal.html = self.html.clone().unwrap_or_default();
            }
        }

        let mut field = Field::new(kind)
            .with_display(self.display)
            .with_display_order(self.display_order)
            .with_required(self.required);
        if let Some(key) = &self.key {
            field = field.with_key(key.as_str());
        }
        if let Some(template) = &self.template {
            field = field.with_template(template.as_str());
        }
        if let Some(group) = &self.group {
            field = field.with_group(group.as_str());
        }
        if let Some(prompt) = &self.prompt {
            field = field.with_prompt(prompt.as_str());
        }
        if let Some(title) = &self.response_title {
            field = field.with_response_title(title.as_str());
        }
        if let Some(message) = &self.required_message {
            field = field.with_required_message(message.as_str());
        }
        for (name, value) in &self.input_attributes {
            field = field.with_input_attribute(name.as_str(), value.as_str());
        }

        if let Some(list) = field.as_list_mut() {
            if let Some(choices) = &self.choices {
                list.choices = choices.to_items();
            }
            if let Some(delimiter) = &self.response_delimiter {
                list.response_delimiter = delimiter.clone();
            }
        }

        for (key, item) in &self.data {
            field.add_data_value(key.as_str(), &item.value, item.client_side)?;
        }
        Ok(field)
    }
}

/// A whole form described as data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,
}

impl FormDefinition {
    /// Build the form, failing on the first field that cannot be built or
    /// inserted
    pub fn build(&self) -> Result<Form> {
        let mut form = Form::with_config(self.form.clone());
        if let Some(template) = &self.template {
            form.set_template(template.as_str());
        }
        for definition in &self.fields {
            form.add_field(definition.build()?)?;
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormError;

    const SURVEY: &str = r#"
        [form]
        field_prefix = "q_"
        serialize = true

        [[fields]]
        type = "text_box"
        key = "name"
        prompt = "Your name"
        required = true
        required_message = "Name please"
        input_attributes = { maxlength = "40" }

        [[fields]]
        type = "radio_list"
        key = "gender"
        choices = "Male,Female"
        orientation = "horizontal"

        [[fields]]
        type = "select"
        key = "month"
        choices = [
            { text = "January", value = "1" },
            { text = "February", value = "2", selected = true },
        ]
        empty_option = "- Select One -"
        size = 3

        [[fields]]
        type = "check_box"
        key = "agree"
        checked_value = "Agreed"

        [[fields]]
        type = "file_upload"
        key = "photo"
        valid_extensions = ".jpg,.png"

        [[fields]]
        type = "literal"
        key = "intro"
        html = "<p>Hello</p>"
        display_order = -1

        [[fields]]
        type = "hidden"
        key = "token"
        value = "abc"
        data = { max = { value = 3, client_side = true } }
    "#;

    #[test]
    fn test_parse_and_build_toml() {
        let definition: FormDefinition = toml::from_str(SURVEY).unwrap();
        assert_eq!(definition.fields.len(), 7);

        let form = definition.build().unwrap();
        assert_eq!(form.field_prefix(), "q_");
        assert!(form.serialize());

        let name = form.field("name").unwrap();
        assert_eq!(name.field_type(), FieldType::TextBox);
        assert_eq!(name.as_input().unwrap().input().required_message, "Name please");

        let gender = form.field("gender").unwrap();
        assert_eq!(gender.as_list().unwrap().comma_delimited_choices(), "Male,Female");

        let month = form.field("month").unwrap();
        assert_eq!(month.response().unwrap(), "2");

        let agree = form.field("agree").unwrap();
        assert_eq!(agree.as_check_box().unwrap().checked_value, "Agreed");

        assert_eq!(
            form.field("photo").unwrap().as_file_upload().unwrap().valid_extensions.as_deref(),
            Some(".jpg,.png")
        );
        assert_eq!(form.field("token").unwrap().data_value::<i32>("max"), Some(3));

        let html = form.render_html(false).unwrap();
        assert!(html.starts_with("<div class=\"DynForm\"><p>Hello</p>"));
        assert!(html.contains("maxlength=\"40\""));
        assert!(html.contains("DynHorizontal"));
        assert!(html.contains("var DynFieldData = {\"token\":{\"max\":3}};"));
    }

    #[test]
    fn test_defaults() {
        let field = FieldDefinition::default().build().unwrap();
        assert_eq!(field.field_type(), FieldType::TextBox);
        assert!(field.display());
        assert_eq!(field.key().len(), 32);
    }

    #[test]
    fn test_bad_pattern_fails_build() {
        let definition = FieldDefinition {
            regular_expression: Some("(".into()),
            ..FieldDefinition::new(FieldType::TextArea)
        };
        assert!(matches!(definition.build(), Err(FormError::InvalidPattern(_))));
    }

    #[test]
    fn test_duplicate_keys_fail_build() {
        let definition = FormDefinition {
            fields: vec![
                FieldDefinition { key: Some("a".into()), ..FieldDefinition::new(FieldType::Hidden) },
                FieldDefinition { key: Some("a".into()), ..FieldDefinition::new(FieldType::TextBox) },
            ],
            ..FormDefinition::default()
        };
        assert!(matches!(definition.build(), Err(FormError::DuplicateKey(_))));
    }

    #[test]
    fn test_toml_round_trip_of_definition() {
        let definition: FormDefinition = toml::from_str(SURVEY).unwrap();
        let text = toml::to_string(&definition).unwrap();
        let again: FormDefinition = toml::from_str(&text).unwrap();
        assert_eq!(definition, again);
    }
}
