//! Form fields
//!
//! A [`Field`] holds the state every field shares (key, template, display
//! settings, attached data) and a [`FieldKind`] carrying the variant
//! specific state. Variants that accept a response implement
//! [`InputField`]; rendering, validation and rebinding dispatch on the kind.

pub mod check_box;
pub mod file_upload;
pub mod hidden;
pub mod input;
pub mod list;
pub mod literal;
pub mod text;

pub use check_box::CheckBox;
pub use file_upload::FileUpload;
pub use hidden::Hidden;
pub use input::{InputField, InputState};
pub use list::{ListField, OrientableField, Select};
pub use literal::Literal;
pub use text::TextField;

use crate::events::FieldEvent;
use crate::patterns;
use crate::placeholder::PlaceHolder;
use crate::value_objects::DataItem;
use crate::{FormError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Field variant identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    TextBox,
    TextArea,
    CheckBox,
    CheckBoxList,
    RadioList,
    Select,
    Literal,
    Hidden,
    FileUpload,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextBox => "text_box",
            Self::TextArea => "text_area",
            Self::CheckBox => "check_box",
            Self::CheckBoxList => "check_box_list",
            Self::RadioList => "radio_list",
            Self::Select => "select",
            Self::Literal => "literal",
            Self::Hidden => "hidden",
            Self::FileUpload => "file_upload",
        };
        f.write_str(name)
    }
}

/// Variant specific state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FieldKind {
    TextBox(TextField),
    TextArea(TextField),
    CheckBox(CheckBox),
    CheckBoxList(OrientableField),
    RadioList(OrientableField),
    Select(Select),
    Literal(Literal),
    Hidden(Hidden),
    FileUpload(FileUpload),
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::TextBox(_) => FieldType::TextBox,
            Self::TextArea(_) => FieldType::TextArea,
            Self::CheckBox(_) => FieldType::CheckBox,
            Self::CheckBoxList(_) => FieldType::CheckBoxList,
            Self::RadioList(_) => FieldType::RadioList,
            Self::Select(_) => FieldType::Select,
            Self::Literal(_) => FieldType::Literal,
            Self::Hidden(_) => FieldType::Hidden,
            Self::FileUpload(_) => FieldType::FileUpload,
        }
    }

    /// Empty state of the given variant
    pub fn empty(field_type: FieldType) -> Self {
        match field_type {
            FieldType::TextBox => Self::TextBox(TextField::new()),
            FieldType::TextArea => Self::TextArea(TextField::new()),
            FieldType::CheckBox => Self::CheckBox(CheckBox::new()),
            FieldType::CheckBoxList => Self::CheckBoxList(OrientableField::new()),
            FieldType::RadioList => Self::RadioList(OrientableField::new()),
            FieldType::Select => Self::Select(Select::new()),
            FieldType::Literal => Self::Literal(Literal::default()),
            FieldType::Hidden => Self::Hidden(Hidden::default()),
            FieldType::FileUpload => Self::FileUpload(FileUpload::new()),
        }
    }

    pub fn as_input(&self) -> Option<&dyn InputField> {
        match self {
            Self::TextBox(f) | Self::TextArea(f) => Some(f),
            Self::CheckBox(f) => Some(f),
            Self::CheckBoxList(f) | Self::RadioList(f) => Some(&f.list),
            Self::Select(f) => Some(&f.list),
            Self::Hidden(f) => Some(f),
            Self::FileUpload(f) => Some(f),
            Self::Literal(_) => None,
        }
    }

    pub fn as_input_mut(&mut self) -> Option<&mut dyn InputField> {
        match self {
            Self::TextBox(f) | Self::TextArea(f) => Some(f),
            Self::CheckBox(f) => Some(f),
            Self::CheckBoxList(f) | Self::RadioList(f) => Some(&mut f.list),
            Self::Select(f) => Some(&mut f.list),
            Self::Hidden(f) => Some(f),
            Self::FileUpload(f) => Some(f),
            Self::Literal(_) => None,
        }
    }

    pub fn default_template(&self) -> String {
        match self {
            Self::CheckBox(_) => CheckBox::default_template(),
            Self::Hidden(_) => PlaceHolder::Input.token().to_string(),
            Self::Literal(_) => PlaceHolder::Literal.token().to_string(),
            _ => input::default_template(),
        }
    }

    fn render(&self, template: &str, ctx: &RenderContext<'_>) -> String {
        match self {
            Self::TextBox(f) => f.render_text_box(template, ctx),
            Self::TextArea(f) => f.render_text_area(template, ctx),
            Self::CheckBox(f) => f.render(template, ctx),
            Self::CheckBoxList(f) => f.render_check_box_list(template, ctx),
            Self::RadioList(f) => f.render_radio_list(template, ctx),
            Self::Select(f) => f.render(template, ctx),
            Self::Literal(f) => f.render(template, ctx),
            Self::Hidden(f) => f.render(template, ctx),
            Self::FileUpload(f) => f.render(template, ctx),
        }
    }
}

/// Ids a renderer needs
pub(crate) struct RenderContext<'a> {
    pub key: &'a str,
    pub html_id: &'a str,
    pub wrapper_id: &'a str,
}

/// Handle to the form a field is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Owner {
    pub form_id: Uuid,
    pub field_prefix: String,
}

fn default_display() -> bool {
    true
}

/// A unit of form UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    key: String,
    template: String,
    #[serde(default = "default_display")]
    display: bool,
    #[serde(default)]
    display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    data: BTreeMap<String, DataItem>,
    #[serde(skip)]
    owner: Option<Owner>,
    kind: FieldKind,
}

impl Field {
    /// Detached field with a generated key and the variant's default template
    pub fn new(kind: FieldKind) -> Self {
        Self {
            key: Uuid::new_v4().simple().to_string(),
            template: kind.default_template(),
            display: true,
            display_order: 0,
            group: None,
            data: BTreeMap::new(),
            owner: None,
            kind,
        }
    }

    pub fn text_box() -> Self {
        Self::new(FieldKind::TextBox(TextField::new()))
    }

    pub fn text_area() -> Self {
        Self::new(FieldKind::TextArea(TextField::new()))
    }

    pub fn check_box() -> Self {
        Self::new(FieldKind::CheckBox(CheckBox::new()))
    }

    pub fn check_box_list(list: ListField) -> Self {
        Self::new(FieldKind::CheckBoxList(OrientableField::new().with_list(list)))
    }

    pub fn radio_list(list: ListField) -> Self {
        Self::new(FieldKind::RadioList(OrientableField::new().with_list(list)))
    }

    pub fn select(list: ListField) -> Self {
        Self::new(FieldKind::Select(Select::new().with_list(list)))
    }

    pub fn literal(html: impl Into<String>) -> Self {
        Self::new(FieldKind::Literal(Literal::new(html)))
    }

    pub fn hidden(value: impl Into<String>) -> Self {
        Self::new(FieldKind::Hidden(Hidden::new(value)))
    }

    pub fn file_upload() -> Self {
        Self::new(FieldKind::FileUpload(FileUpload::new()))
    }

    // --- identity ---

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Set the key of a detached field. Unchecked: uniqueness is enforced
    /// when the field is inserted into a form.
    pub fn set_key(&mut self, key: impl Into<String>) -> Result<()> {
        if self.owner.is_some() {
            return Err(FormError::Attached(self.key.clone()));
        }
        self.key = key.into();
        Ok(())
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        // a builder only ever sees detached fields
        self.key = key.into();
        self
    }

    pub(crate) fn replace_key(&mut self, key: String) {
        self.key = key;
    }

    pub fn is_attached(&self) -> bool {
        self.owner.is_some()
    }

    /// Id of the owning form
    pub fn form_id(&self) -> Option<Uuid> {
        self.owner.as_ref().map(|o| o.form_id)
    }

    pub(crate) fn attach(&mut self, owner: Owner) {
        self.owner = Some(owner);
    }

    pub(crate) fn detach(&mut self) {
        self.owner = None;
    }

    /// Form prefix + key, checked against the HTML id grammar
    pub fn html_id(&self) -> Result<String> {
        let owner = self
            .owner
            .as_ref()
            .ok_or_else(|| FormError::Detached(self.key.clone()))?;
        let id = format!("{}{}", owner.field_prefix, self.key);
        if !patterns::is_html_id(&id) {
            return Err(FormError::InvalidHtmlId(id));
        }
        Ok(id)
    }

    // --- presentation ---

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn display(&self) -> bool {
        self.display
    }

    pub fn set_display(&mut self, display: bool) {
        self.display = display;
    }

    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    pub fn display_order(&self) -> i32 {
        self.display_order
    }

    pub fn set_display_order(&mut self, order: i32) {
        self.display_order = order;
    }

    pub fn with_display_order(mut self, order: i32) -> Self {
        self.display_order = order;
        self
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn set_group(&mut self, group: Option<String>) {
        self.group = group;
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    // --- attached data ---

    pub fn data(&self) -> &BTreeMap<String, DataItem> {
        &self.data
    }

    /// Attach a value; replaces any previous value under `key`
    pub fn add_data_value<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
        client_side: bool,
    ) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.data.insert(key.into(), DataItem::new(value, client_side));
        Ok(())
    }

    /// Typed read of an attached value; `None` if missing or of another shape
    pub fn data_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let item = self.data.get(key)?;
        serde_json::from_value(item.value.clone()).ok()
    }

    pub fn remove_data_value(&mut self, key: &str) -> Option<DataItem> {
        self.data.remove(key)
    }

    pub fn has_client_data(&self) -> bool {
        self.data.values().any(|d| d.client_side)
    }

    /// Client-visible entries only
    pub fn client_data(&self) -> BTreeMap<&str, &serde_json::Value> {
        self.data
            .iter()
            .filter(|(_, d)| d.client_side)
            .map(|(k, d)| (k.as_str(), &d.value))
            .collect()
    }

    // --- variant access ---

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut FieldKind {
        &mut self.kind
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    pub fn is_input(&self) -> bool {
        self.kind.as_input().is_some()
    }

    pub fn as_input(&self) -> Option<&dyn InputField> {
        self.kind.as_input()
    }

    pub fn as_input_mut(&mut self) -> Option<&mut dyn InputField> {
        self.kind.as_input_mut()
    }

    /// Text box or text area state
    pub fn as_text(&self) -> Option<&TextField> {
        match &self.kind {
            FieldKind::TextBox(f) | FieldKind::TextArea(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextField> {
        match &mut self.kind {
            FieldKind::TextBox(f) | FieldKind::TextArea(f) => Some(f),
            _ => None,
        }
    }

    /// Choice state of a checkbox list, radio list or select
    pub fn as_list(&self) -> Option<&ListField> {
        match &self.kind {
            FieldKind::CheckBoxList(f) | FieldKind::RadioList(f) => Some(&f.list),
            FieldKind::Select(f) => Some(&f.list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListField> {
        match &mut self.kind {
            FieldKind::CheckBoxList(f) | FieldKind::RadioList(f) => Some(&mut f.list),
            FieldKind::Select(f) => Some(&mut f.list),
            _ => None,
        }
    }

    pub fn as_orientable_mut(&mut self) -> Option<&mut OrientableField> {
        match &mut self.kind {
            FieldKind::CheckBoxList(f) | FieldKind::RadioList(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_select_mut(&mut self) -> Option<&mut Select> {
        match &mut self.kind {
            FieldKind::Select(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_check_box(&self) -> Option<&CheckBox> {
        match &self.kind {
            FieldKind::CheckBox(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_check_box_mut(&mut self) -> Option<&mut CheckBox> {
        match &mut self.kind {
            FieldKind::CheckBox(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_hidden_mut(&mut self) -> Option<&mut Hidden> {
        match &mut self.kind {
            FieldKind::Hidden(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_file_upload(&self) -> Option<&FileUpload> {
        match &self.kind {
            FieldKind::FileUpload(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_file_upload_mut(&mut self) -> Option<&mut FileUpload> {
        match &mut self.kind {
            FieldKind::FileUpload(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_literal_mut(&mut self) -> Option<&mut Literal> {
        match &mut self.kind {
            FieldKind::Literal(f) => Some(f),
            _ => None,
        }
    }

    // --- input state shortcuts (no effect on literals) ---

    fn input_state_mut(&mut self) -> Option<&mut InputState> {
        self.kind.as_input_mut().map(|f| f.input_mut())
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        if let Some(input) = self.input_state_mut() {
            input.prompt = Some(prompt.into());
        }
        self
    }

    pub fn with_response_title(mut self, title: impl Into<String>) -> Self {
        if let Some(input) = self.input_state_mut() {
            input.response_title = Some(title.into());
        }
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        if let Some(input) = self.input_state_mut() {
            input.required = required;
        }
        self
    }

    pub fn with_required_message(mut self, message: impl Into<String>) -> Self {
        if let Some(input) = self.input_state_mut() {
            input.required_message = message.into();
        }
        self
    }

    pub fn with_input_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Some(input) = self.input_state_mut() {
            input.input_attributes.insert(name.into(), value.into());
        }
        self
    }

    /// Current validation error
    pub fn error(&self) -> Option<&str> {
        self.as_input()
            .and_then(|f| f.input().error.as_deref())
            .filter(|e| !e.is_empty())
    }

    pub fn clear_error(&mut self) {
        if let Some(input) = self.input_state_mut() {
            input.clear_error();
        }
    }

    /// The user's response; `None` for literals
    pub fn response(&self) -> Option<String> {
        self.as_input().map(|f| f.response())
    }

    /// Title under which the response is reported
    pub fn response_title(&self) -> Option<&str> {
        self.as_input().map(|f| f.input().title(&self.key))
    }

    /// Observe validation of this field
    pub fn on_validated<F>(&mut self, hook: F)
    where
        F: Fn(&FieldEvent) + Send + Sync + 'static,
    {
        if let Some(input) = self.input_state_mut() {
            input.hooks.register(hook);
        }
    }

    // --- behaviour ---

    /// Validate the response. Literals are always valid.
    pub fn validate(&mut self) -> bool {
        let Field { key, kind, .. } = self;
        match kind.as_input_mut() {
            Some(field) => field.validate(key.as_str()),
            None => true,
        }
    }

    /// Render with every placeholder resolved. Needs an attached field.
    pub fn render_html(&self) -> Result<String> {
        let html_id = self.html_id()?;
        let wrapper_id = format!("{}_wrapper", html_id);
        let ctx = RenderContext {
            key: &self.key,
            html_id: &html_id,
            wrapper_id: &wrapper_id,
        };
        Ok(self.kind.render(&self.template, &ctx))
    }
}

impl From<FieldKind> for Field {
    fn from(kind: FieldKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::contains_placeholder;
    use crate::value_objects::{ListItem, Orientation};

    fn attached(field: Field) -> Field {
        let mut field = field;
        field.attach(Owner {
            form_id: Uuid::new_v4(),
            field_prefix: "p_".into(),
        });
        field
    }

    #[test]
    fn test_generated_keys_are_unique_hex() {
        let a = Field::text_box();
        let b = Field::text_box();
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key().len(), 32);
        assert!(a.key().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_html_id_requires_owner() {
        let field = Field::text_box().with_key("name");
        assert!(matches!(field.html_id(), Err(FormError::Detached(_))));
        assert!(matches!(field.render_html(), Err(FormError::Detached(_))));

        let field = attached(field);
        assert_eq!(field.html_id().unwrap(), "p_name");
    }

    #[test]
    fn test_html_id_grammar() {
        let field = attached(Field::text_box().with_key("bad key"));
        assert!(matches!(field.html_id(), Err(FormError::InvalidHtmlId(id)) if id == "p_bad key"));
    }

    #[test]
    fn test_set_key_rejected_when_attached() {
        let mut field = Field::text_box().with_key("a");
        field.set_key("b").unwrap();
        assert_eq!(field.key(), "b");

        let mut field = attached(field);
        assert!(matches!(field.set_key("c"), Err(FormError::Attached(_))));
        assert_eq!(field.key(), "b");
    }

    #[test]
    fn test_data_dictionary() {
        let mut field = Field::hidden("x");
        assert!(!field.has_client_data());
        field.add_data_value("secret", &42, false).unwrap();
        assert!(!field.has_client_data());
        field.add_data_value("max", &vec![1, 2], true).unwrap();
        assert!(field.has_client_data());

        assert_eq!(field.data_value::<i32>("secret"), Some(42));
        assert_eq!(field.data_value::<String>("secret"), None);
        assert_eq!(field.data_value::<Vec<u8>>("max"), Some(vec![1, 2]));
        assert_eq!(field.client_data().len(), 1);
    }

    #[test]
    fn test_text_box_markup() {
        let mut field = attached(
            Field::text_box()
                .with_key("name")
                .with_prompt("Your <name>")
                .with_input_attribute("maxlength", "20"),
        );
        field.as_text_mut().unwrap().set_value("A \"quoted\" value");
        let html = field.render_html().unwrap();
        assert_eq!(
            html,
            "<div class=\"DynFieldWrapper\" id=\"p_name_wrapper\">\
             <label class=\"DynFieldPrompt\" for=\"p_name\">Your &lt;name&gt;</label>\
             <input id=\"p_name\" maxlength=\"20\" name=\"p_name\" type=\"text\" value=\"A &quot;quoted&quot; value\" />\
             </div>"
        );
    }

    #[test]
    fn test_error_label_rendered_after_validation() {
        let mut field = attached(Field::text_area().with_key("bio").with_required(true));
        assert!(!field.render_html().unwrap().contains("DynFieldError"));
        assert!(!field.validate());
        let html = field.render_html().unwrap();
        assert!(html.contains("<label class=\"DynFieldError\" for=\"p_bio\">Required</label>"));
        assert!(html.contains("<textarea id=\"p_bio\" name=\"p_bio\"></textarea>"));
    }

    #[test]
    fn test_check_box_markup() {
        let mut field = attached(Field::check_box().with_key("agree").with_prompt("I agree"));
        field.as_check_box_mut().unwrap().checked = true;
        let html = field.render_html().unwrap();
        let input = html.find("type=\"checkbox\"").unwrap();
        let prompt = html.find("I agree").unwrap();
        assert!(input < prompt);
        assert!(html.contains("checked=\"checked\""));
        assert!(html.contains("<input id=\"p_agree_hidden\" name=\"p_agree\" type=\"hidden\" value=\"False\" />"));
        assert!(html.contains("class=\"DynCheckboxPrompt\""));
    }

    #[test]
    fn test_radio_list_markup() {
        let list = ListField::new().with_choices([
            ListItem::with_text("Male", "m"),
            ListItem::with_text("Female", "f").selected(true),
        ]);
        let mut field = attached(Field::radio_list(list).with_key("gender"));
        field.as_orientable_mut().unwrap().orientation = Orientation::Horizontal;
        let html = field.render_html().unwrap();
        assert!(html.contains("<ul class=\"DynHorizontal DynOrientableList\">"));
        assert!(html.contains("<li><input id=\"p_gender0\" name=\"p_gender\" type=\"radio\" value=\"m\" />"));
        assert!(html.contains("<input checked=\"checked\" id=\"p_gender1\" name=\"p_gender\" type=\"radio\" value=\"f\" />"));
        assert!(html.contains("<label class=\"DynListFieldInputLabel\" for=\"p_gender1\">Female</label>"));
        // list prompts are not bound to a single input
        assert!(html.contains("<label class=\"DynFieldPrompt\">gender</label>"));
        assert!(!html.contains("p_gender_hidden"));
    }

    #[test]
    fn test_check_box_list_posts_hidden_value() {
        let mut list = ListField::new();
        list.add_choices("a,b", ",");
        let html = attached(Field::check_box_list(list).with_key("tags"))
            .render_html()
            .unwrap();
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("<input id=\"p_tags_hidden\" name=\"p_tags\" type=\"hidden\" value=\"\" />"));
    }

    #[test]
    fn test_select_markup() {
        let list = ListField::new().with_choices([ListItem::new("UK"), ListItem::new("US").selected(true)]);
        let mut field = attached(Field::select(list).with_key("country"));
        {
            let select = field.as_select_mut().unwrap();
            select.size = 3;
            select.multiple = true;
            select.empty_option = Some("- pick -".into());
            select.show_empty_option = true;
        }
        let html = field.render_html().unwrap();
        assert!(html.contains("<select id=\"p_country\" multiple=\"multiple\" name=\"p_country\" size=\"3\">"));
        assert!(html.contains("<option value=\"\">- pick -</option><option value=\"UK\">UK</option>"));
        assert!(html.contains("<option selected=\"selected\" value=\"US\">US</option></select>"));
        assert!(html.contains("p_country_hidden"));
    }

    #[test]
    fn test_hidden_and_literal_templates() {
        let hidden = attached(Field::hidden("abc").with_key("token"));
        assert_eq!(
            hidden.render_html().unwrap(),
            "<input id=\"p_token\" name=\"p_token\" type=\"hidden\" value=\"abc\" />"
        );

        let literal = attached(
            Field::literal("<em>hi</em>")
                .with_key("intro")
                .with_template(format!("<p id=\"{}\">{}</p>", PlaceHolder::FieldWrapperId, PlaceHolder::Literal)),
        );
        assert_eq!(literal.render_html().unwrap(), "<p id=\"p_intro_wrapper\"><em>hi</em></p>");
    }

    #[test]
    fn test_file_upload_markup() {
        let html = attached(Field::file_upload().with_key("cv")).render_html().unwrap();
        assert!(html.contains("<input id=\"p_cv\" name=\"p_cv\" type=\"file\" />"));
    }

    #[test]
    fn test_every_variant_renders_without_tokens() {
        let types = [
            FieldType::TextBox,
            FieldType::TextArea,
            FieldType::CheckBox,
            FieldType::CheckBoxList,
            FieldType::RadioList,
            FieldType::Select,
            FieldType::Literal,
            FieldType::Hidden,
            FieldType::FileUpload,
        ];
        for t in types {
            let mut field = attached(Field::new(FieldKind::empty(t)).with_required(true));
            field.validate();
            let html = field.render_html().unwrap();
            assert!(!contains_placeholder(&html), "{} leaked a placeholder", t);
            assert_eq!(field.field_type(), t);
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let field = attached(Field::text_box().with_key("x"));
        assert_eq!(field.render_html().unwrap(), field.render_html().unwrap());
    }

    #[test]
    fn test_validated_hook_sees_result() {
        use std::sync::{Arc, Mutex};
        let seen = Arc::new(Mutex::new(None));
        let mut field = Field::check_box().with_key("agree").with_required(true);
        let sink = seen.clone();
        field.on_validated(move |e| {
            if let FieldEvent::Validated { is_valid, .. } = e {
                *sink.lock().unwrap() = Some(*is_valid);
            }
        });
        field.validate();
        assert_eq!(*seen.lock().unwrap(), Some(false));
    }

    #[test]
    fn test_literal_is_not_input() {
        let mut literal = Field::literal("x");
        assert!(!literal.is_input());
        assert!(literal.validate());
        assert_eq!(literal.response(), None);
        assert_eq!(literal.error(), None);
    }
}
