//! The form aggregate

use crate::config::{
    classes, FormConfig, DEFAULT_DATA_SCRIPT_VAR, DEFAULT_FIELD_PREFIX, SERIALIZED_FORM_FIELD,
};
use crate::field::{Field, Owner};
use crate::field_list::{FieldList, FieldMut};
use crate::html::{format_markup, Tag};
use crate::placeholder::{self, PlaceHolder, Substitution};
use crate::serialization;
use crate::value_objects::Response;
use crate::{FormError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// `<div class="DynForm">{Fields}{SerializedForm}{DataScript}</div>`
pub fn default_template() -> String {
    let inner = [PlaceHolder::Fields, PlaceHolder::SerializedForm, PlaceHolder::DataScript]
        .iter()
        .map(|p| p.token())
        .collect::<String>();
    Tag::new("div").class(classes::FORM).inner_html(inner).render()
}

/// An html form rendered at runtime from its fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FormSnapshot")]
pub struct Form {
    id: Uuid,
    template: String,
    field_prefix: String,
    serialize: bool,
    data_script_var: String,
    fields: FieldList,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    pub fn new() -> Self {
        Self::with_config(FormConfig::default())
    }

    pub fn with_config(config: FormConfig) -> Self {
        let id = Uuid::new_v4();
        let owner = Owner {
            form_id: id,
            field_prefix: config.field_prefix.clone(),
        };
        Self {
            id,
            template: default_template(),
            field_prefix: config.field_prefix,
            serialize: config.serialize,
            data_script_var: config.data_script_var,
            fields: FieldList::new(owner),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> FormConfig {
        FormConfig {
            field_prefix: self.field_prefix.clone(),
            serialize: self.serialize,
            data_script_var: self.data_script_var.clone(),
        }
    }

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

    pub fn field_prefix(&self) -> &str {
        &self.field_prefix
    }

    /// Change the prefix of every rendered id and name
    pub fn set_field_prefix(&mut self, prefix: impl Into<String>) {
        self.field_prefix = prefix.into();
        self.fields.set_owner(Owner {
            form_id: self.id,
            field_prefix: self.field_prefix.clone(),
        });
    }

    pub fn serialize(&self) -> bool {
        self.serialize
    }

    /// Embed a snapshot when rendering
    pub fn set_serialize(&mut self, serialize: bool) {
        self.serialize = serialize;
    }

    pub fn data_script_var(&self) -> &str {
        &self.data_script_var
    }

    pub fn set_data_script_var(&mut self, name: impl Into<String>) {
        self.data_script_var = name.into();
    }

    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    /// Append fields in order; stops at the first rejected key
    pub fn add_fields(&mut self, fields: impl IntoIterator<Item = Field>) -> Result<()> {
        for field in fields {
            self.fields.push(field)?;
        }
        Ok(())
    }

    pub fn add_field(&mut self, field: Field) -> Result<()> {
        self.fields.push(field)
    }

    pub fn insert_field(&mut self, index: usize, field: Field) -> Result<()> {
        self.fields.insert(index, field)
    }

    /// Replace the field at `index`, returning the detached previous one
    pub fn set_field(&mut self, index: usize, field: Field) -> Result<Field> {
        self.fields.set(index, field)
    }

    pub fn remove_field(&mut self, key: &str) -> Option<Field> {
        self.fields.remove_field(key)
    }

    /// Detach and return every field
    pub fn clear_fields(&mut self) -> Vec<Field> {
        self.fields.clear()
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.find(key)
    }

    pub fn field_mut(&mut self, key: &str) -> Option<FieldMut<'_>> {
        self.fields.find_mut(key)
    }

    pub fn rekey_field(&mut self, key: &str, new_key: impl Into<String>) -> Result<()> {
        self.fields.rekey(key, new_key)
    }

    /// Fields accepting a response
    pub fn input_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_input())
    }

    /// Give the listed fields the same template; unknown keys are ignored
    pub fn set_field_templates<I, K>(&mut self, template: &str, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            if let Some(mut field) = self.fields.find_mut(key.as_ref()) {
                field.set_template(template);
            }
        }
    }

    pub fn clear_all_errors(&mut self) {
        for mut field in &mut self.fields {
            field.clear_error();
        }
    }

    /// Validate every input field, or only the displayed ones
    ///
    /// Every candidate field is validated even after a failure so that all
    /// errors are recorded.
    pub fn validate(&mut self, only_displayed: bool) -> bool {
        let mut is_valid = true;
        for mut field in &mut self.fields {
            if only_displayed && !field.display() {
                continue;
            }
            is_valid &= field.validate();
        }
        debug!(form_id = %self.id, is_valid, "Validated form");
        is_valid
    }

    /// One response per input field, in display order
    pub fn responses(&self, completed_only: bool) -> Vec<Response> {
        let mut inputs: Vec<&Field> = self.input_fields().collect();
        inputs.sort_by_key(|f| f.display_order());
        inputs
            .into_iter()
            .filter_map(|f| {
                let value = f.response()?;
                if completed_only && value.is_empty() {
                    return None;
                }
                Some(Response {
                    title: f.response_title().unwrap_or(f.key()).to_string(),
                    value,
                })
            })
            .collect()
    }

    /// Client data script block; `None` when no field carries client data
    ///
    /// `var_name` defaults to the form's data script variable.
    pub fn render_data_script(&self, var_name: Option<&str>) -> Result<Option<String>> {
        if !self.fields.iter().any(Field::has_client_data) {
            return Ok(None);
        }
        let var_name = var_name
            .filter(|v| !v.is_empty())
            .unwrap_or(self.data_script_var.as_str());
        // keep "</script>" in a data value from closing the block
        let json = serialization::client_data_json(self)?.replace("</", "<\\/");
        let script = Tag::new("script")
            .attr("type", "text/javascript")
            .inner_html(format!("\nvar {} = {};", var_name, json))
            .render();
        Ok(Some(script))
    }

    /// Render displayed fields into the form template
    ///
    /// With `format_html` the markup is re-indented, which fails unless it
    /// is well formed.
    pub fn render_html(&self, format_html: bool) -> Result<String> {
        let mut displayed: Vec<&Field> = self.fields.iter().filter(|f| f.display()).collect();
        displayed.sort_by_key(|f| f.display_order());

        let mut fields_html = String::new();
        for field in &displayed {
            fields_html.push_str(&field.render_html()?);
        }

        let snapshot = if self.serialize {
            Tag::new("input")
                .attr("type", "hidden")
                .attr("id", SERIALIZED_FORM_FIELD)
                .attr("name", SERIALIZED_FORM_FIELD)
                .attr("value", serialization::serialize_form(self)?)
                .self_closing()
        } else {
            String::new()
        };
        let data_script = self.render_data_script(None)?.unwrap_or_default();

        let html = Substitution::new()
            .with(PlaceHolder::Fields, &fields_html)
            .with(PlaceHolder::SerializedForm, &snapshot)
            .with(PlaceHolder::DataScript, &data_script)
            .apply(&self.template);
        let html = placeholder::strip_all(&html);

        debug!(
            form_id = %self.id,
            displayed = displayed.len(),
            serialized = self.serialize,
            "Rendered form"
        );

        if format_html {
            return format_markup(&html);
        }
        Ok(html)
    }

    /// Notify upload observers of files bound during rebinding
    pub(crate) fn fire_file_posted(&self) {
        for field in &self.fields {
            if let Some(upload) = field.as_file_upload() {
                upload.fire_posted(field.key());
            }
        }
    }
}

fn default_field_prefix() -> String {
    DEFAULT_FIELD_PREFIX.into()
}

fn default_data_script_var() -> String {
    DEFAULT_DATA_SCRIPT_VAR.into()
}

/// Wire shape of a form; fields are re-inserted through the field list
#[derive(Deserialize)]
struct FormSnapshot {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    #[serde(default = "default_template")]
    template: String,
    #[serde(default = "default_field_prefix")]
    field_prefix: String,
    #[serde(default)]
    serialize: bool,
    #[serde(default = "default_data_script_var")]
    data_script_var: String,
    #[serde(default)]
    fields: Vec<Field>,
}

impl TryFrom<FormSnapshot> for Form {
    type Error = FormError;

    fn try_from(snapshot: FormSnapshot) -> Result<Self> {
        let mut form = Form::with_config(FormConfig {
            field_prefix: snapshot.field_prefix,
            serialize: snapshot.serialize,
            data_script_var: snapshot.data_script_var,
        });
        form.id = snapshot.id;
        form.template = snapshot.template;
        form.fields = FieldList::new(Owner {
            form_id: form.id,
            field_prefix: form.field_prefix.clone(),
        });
        form.add_fields(snapshot.fields)?;
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldKind, FieldType, ListField};
    use crate::placeholder::contains_placeholder;
    use crate::serialization::{deserialize_form, serialize_form};
    use crate::value_objects::ListItem;
    use proptest::prelude::*;

    fn sample_form() -> Form {
        let mut form = Form::new();
        form.add_fields([
            Field::text_box()
                .with_key("name")
                .with_prompt("Name")
                .with_required(true)
                .with_display_order(2),
            Field::check_box().with_key("agree").with_prompt("I agree").with_display_order(3),
            Field::select(ListField::new().with_choices([ListItem::new("UK"), ListItem::new("US")]))
                .with_key("country")
                .with_response_title("Country")
                .with_display_order(1),
            Field::literal("<hr />").with_key("rule"),
        ])
        .unwrap();
        form
    }

    #[test]
    fn test_default_template() {
        let form = Form::new();
        assert!(form.template().starts_with("<div class=\"DynForm\">"));
        assert!(form.template().contains(PlaceHolder::SerializedForm.token()));
        assert_eq!(form.field_prefix(), "DynField_");
    }

    #[test]
    fn test_render_orders_by_display_order() {
        let html = sample_form().render_html(false).unwrap();
        let rule = html.find("<hr />").unwrap();
        let country = html.find("DynField_country").unwrap();
        let name = html.find("DynField_name").unwrap();
        let agree = html.find("DynField_agree").unwrap();
        assert!(rule < country && country < name && name < agree);
        assert!(!contains_placeholder(&html));
        assert!(!html.contains(SERIALIZED_FORM_FIELD));
    }

    #[test]
    fn test_hidden_fields_not_rendered() {
        let mut form = sample_form();
        form.field_mut("name").unwrap().set_display(false);
        let html = form.render_html(false).unwrap();
        assert!(!html.contains("DynField_name"));
    }

    #[test]
    fn test_render_embeds_snapshot() {
        let mut form = sample_form();
        form.set_serialize(true);
        let html = form.render_html(false).unwrap();
        let marker = "id=\"DynSerializedForm\" name=\"DynSerializedForm\" type=\"hidden\" value=\"";
        let start = html.find(marker).unwrap() + marker.len();
        let end = start + html[start..].find('"').unwrap();
        let restored = deserialize_form(&html[start..end]).unwrap();
        assert_eq!(restored.id(), form.id());
        assert_eq!(restored.fields().len(), 4);
        assert!(restored.serialize());
    }

    #[test]
    fn test_render_formatted() {
        let pretty = sample_form().render_html(true).unwrap();
        assert!(pretty.contains('\n'));
        assert!(pretty.starts_with("<div class=\"DynForm\">"));

        let mut broken = sample_form();
        broken.set_template(format!("<div>{}", PlaceHolder::Fields));
        assert!(matches!(broken.render_html(true), Err(FormError::MalformedMarkup(_))));
    }

    #[test]
    fn test_invalid_prefix_surfaces_on_render() {
        let mut form = sample_form();
        form.set_field_prefix("9bad");
        assert!(matches!(form.render_html(false), Err(FormError::InvalidHtmlId(_))));
        form.set_field_prefix("");
        assert!(form.render_html(false).unwrap().contains("id=\"name\""));
    }

    #[test]
    fn test_validate_does_not_short_circuit() {
        let mut form = Form::new();
        form.add_fields([
            Field::text_box().with_key("a").with_required(true),
            Field::text_box().with_key("b").with_required(true),
            Field::text_box().with_key("c").with_required(true).with_display(false),
        ])
        .unwrap();

        assert!(!form.validate(true));
        assert_eq!(form.field("a").unwrap().error(), Some("Required"));
        assert_eq!(form.field("b").unwrap().error(), Some("Required"));
        assert_eq!(form.field("c").unwrap().error(), None);

        assert!(!form.validate(false));
        assert_eq!(form.field("c").unwrap().error(), Some("Required"));

        form.clear_all_errors();
        assert!(form.input_fields().all(|f| f.error().is_none()));
    }

    #[test]
    fn test_responses() {
        let mut form = sample_form();
        form.field_mut("name").unwrap().as_text_mut().unwrap().set_value(" Jane ");
        form.field_mut("country").unwrap().as_list_mut().unwrap().select_values(["US"]);

        let all = form.responses(false);
        let titles: Vec<_> = all.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Country", "Name", "I agree"]);
        assert_eq!(all[1].value, "Jane");
        assert_eq!(all[2].value, "No");

        form.field_mut("country").unwrap().as_list_mut().unwrap().select_values(None::<&str>);
        let completed = form.responses(true);
        assert_eq!(completed.len(), 2);
    }

    #[test]
    fn test_data_script() {
        let mut form = sample_form();
        assert_eq!(form.render_data_script(None).unwrap(), None);

        form.field_mut("name")
            .unwrap()
            .add_data_value("hint", &"</script><b>", true)
            .unwrap();
        let script = form.render_data_script(Some("Data")).unwrap().unwrap();
        assert_eq!(
            script,
            "<script type=\"text/javascript\">\nvar Data = {\"name\":{\"hint\":\"<\\/script><b>\"}};</script>"
        );
        let html = form.render_html(false).unwrap();
        assert!(html.contains("var DynFieldData = "));
    }

    #[test]
    fn test_set_field_templates() {
        let mut form = sample_form();
        form.set_field_templates("<p>{x}</p>", ["name", "agree", "missing"]);
        assert_eq!(form.field("name").unwrap().template(), "<p>{x}</p>");
        assert_eq!(form.field("agree").unwrap().template(), "<p>{x}</p>");
        assert_ne!(form.field("country").unwrap().template(), "<p>{x}</p>");
    }

    #[test]
    fn test_rekey_field_updates_rendered_id() {
        let mut form = sample_form();
        form.rekey_field("name", "full_name").unwrap();
        assert!(form.render_html(false).unwrap().contains("DynField_full_name"));
        assert!(matches!(form.rekey_field("agree", "country"), Err(FormError::DuplicateKey(_))));
    }

    fn arb_field_type() -> impl Strategy<Value = FieldType> {
        prop_oneof![
            Just(FieldType::TextBox),
            Just(FieldType::TextArea),
            Just(FieldType::CheckBox),
            Just(FieldType::CheckBoxList),
            Just(FieldType::RadioList),
            Just(FieldType::Select),
            Just(FieldType::Literal),
            Just(FieldType::Hidden),
            Just(FieldType::FileUpload),
        ]
    }

    fn arb_field() -> impl Strategy<Value = Field> {
        (
            arb_field_type(),
            any::<bool>(),
            any::<bool>(),
            -5i32..5,
            ".{0,12}",
            prop::collection::vec("[A-Za-z<&\"]{1,6}", 0..4),
        )
            .prop_map(|(t, display, required, order, text, choices)| {
                let mut field = Field::new(FieldKind::empty(t))
                    .with_display(display)
                    .with_display_order(order)
                    .with_required(required)
                    .with_prompt(text.clone());
                if let Some(f) = field.as_text_mut() {
                    f.set_value(text.clone());
                }
                if let Some(list) = field.as_list_mut() {
                    list.choices = choices.into_iter().map(ListItem::new).collect();
                    if let Some(first) = list.choices.first_mut() {
                        first.selected = true;
                    }
                }
                if let Some(literal) = field.as_literal_mut() {
                    literal.html = html_escape::encode_text(&text).into_owned();
                }
                field
            })
    }

    #[test]
    fn test_equal_display_order_keeps_insertion_order() {
        let mut form = Form::new();
        form.add_fields(["c", "a", "d", "b"].map(|key| {
            Field::text_box()
                .with_key(key)
                .with_response_title(key.to_uppercase())
                .with_display_order(1)
        }))
        .unwrap();
        form.add_field(
            Field::text_box()
                .with_key("first")
                .with_response_title("FIRST")
                .with_display_order(0),
        )
        .unwrap();

        let html = form.render_html(false).unwrap();
        let positions: Vec<usize> = ["first", "c", "a", "d", "b"]
            .iter()
            .map(|key| html.find(&format!("id=\"DynField_{}\"", key)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let titles: Vec<String> = form.responses(false).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["FIRST", "C", "A", "D", "B"]);
    }

    #[test]
    fn test_field_mut_keeps_keys_distinct() {
        let mut form = Form::new();
        form.add_fields([Field::text_box().with_key("a"), Field::text_box().with_key("b")])
            .unwrap();

        assert!(matches!(
            form.set_field(0, Field::check_box().with_key("b")),
            Err(FormError::DuplicateKey(_))
        ));
        {
            let mut a = form.field_mut("a").unwrap();
            *a.kind_mut() = FieldKind::empty(FieldType::CheckBox);
            a.set_display_order(5);
        }

        let keys: Vec<&str> = form.fields().keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(form.field("a").unwrap().form_id(), Some(form.id()));
        assert!(form.render_html(false).is_ok());
        let restored = deserialize_form(&serialize_form(&form).unwrap()).unwrap();
        assert!(restored.field("a").unwrap().as_check_box().is_some());
        assert_eq!(restored.field("a").unwrap().display_order(), 5);
    }

    #[test]
    fn test_field_list_edits_through_form() {
        let mut form = sample_form();
        form.insert_field(0, Field::hidden("x").with_key("token")).unwrap();
        assert_eq!(form.fields().index_of("token"), Some(0));

        let old = form.set_field(0, Field::hidden("y").with_key("token")).unwrap();
        assert!(!old.is_attached());
        let removed = form.remove_field("token").unwrap();
        assert!(!removed.is_attached());

        let cleared = form.clear_fields();
        assert_eq!(cleared.len(), 4);
        assert!(form.fields().is_empty());
    }

    fn arb_form() -> impl Strategy<Value = Form> {
        prop::collection::vec(arb_field(), 0..8).prop_map(|fields| {
            let mut form = Form::new();
            form.add_fields(fields).unwrap();
            form
        })
    }

    proptest! {
        #[test]
        fn prop_snapshot_round_trip(form in arb_form()) {
            let restored = deserialize_form(&serialize_form(&form).unwrap()).unwrap();
            prop_assert_eq!(restored.fields().len(), form.fields().len());
            for (a, b) in form.fields().iter().zip(restored.fields()) {
                prop_assert_eq!(a.key(), b.key());
                prop_assert_eq!(a.field_type(), b.field_type());
                prop_assert_eq!(a.display(), b.display());
                prop_assert_eq!(a.display_order(), b.display_order());
                prop_assert_eq!(a.template(), b.template());
                prop_assert_eq!(a.response(), b.response());
                prop_assert!(b.is_attached());
                prop_assert_eq!(b.form_id(), Some(restored.id()));
                prop_assert_eq!(
                    serde_json::to_value(a).unwrap(),
                    serde_json::to_value(b).unwrap()
                );
            }
        }

        #[test]
        fn prop_rendered_markup_has_no_placeholders(mut form in arb_form(), serialize in any::<bool>()) {
            form.set_serialize(serialize);
            form.validate(false);
            let html = form.render_html(false).unwrap();
            prop_assert!(!contains_placeholder(&html));
        }

        #[test]
        fn prop_validate_only_touches_errors(mut form in arb_form(), only_displayed in any::<bool>()) {
            let before: Vec<(String, bool, i32)> = form
                .fields()
                .iter()
                .map(|f| (f.key().to_string(), f.display(), f.display_order()))
                .collect();
            form.validate(only_displayed);
            let after: Vec<(String, bool, i32)> = form
                .fields()
                .iter()
                .map(|f| (f.key().to_string(), f.display(), f.display_order()))
                .collect();
            prop_assert_eq!(before, after);
        }
    }
}
