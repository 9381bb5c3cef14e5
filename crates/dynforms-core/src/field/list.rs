//! Choice fields: CheckBoxList, RadioList and Select

use super::input::{InputField, InputState};
use super::RenderContext;
use crate::config::classes;
use crate::html::Tag;
use crate::value_objects::{ListItem, Orientation};
use serde::{Deserialize, Serialize};

/// A field whose response is chosen from a list of items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListField {
    pub input: InputState,
    pub choices: Vec<ListItem>,
    /// Joins multiple selected values in the response
    pub response_delimiter: String,
}

impl Default for ListField {
    fn default() -> Self {
        Self {
            input: InputState::default(),
            choices: Vec::new(),
            response_delimiter: ", ".into(),
        }
    }
}

impl ListField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_choices(mut self, choices: impl IntoIterator<Item = ListItem>) -> Self {
        self.choices.extend(choices);
        self
    }

    /// Add choices from a delimited string. Empty and repeated entries are
    /// skipped; each entry is both text and value.
    pub fn add_choices(&mut self, choices: &str, delimiter: &str) {
        if choices.is_empty() || delimiter.is_empty() {
            return;
        }
        let mut seen: Vec<&str> = Vec::new();
        for choice in choices.split(delimiter).filter(|c| !c.is_empty()) {
            if !seen.contains(&choice) {
                seen.push(choice);
                self.choices.push(ListItem::new(choice));
            }
        }
    }

    /// Choice texts joined by commas
    pub fn comma_delimited_choices(&self) -> String {
        self.choices
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Replace all choices with a comma delimited list
    pub fn set_comma_delimited_choices(&mut self, choices: &str) {
        self.choices.clear();
        self.add_choices(choices, ",");
    }

    pub fn selected(&self) -> impl Iterator<Item = &ListItem> {
        self.choices.iter().filter(|c| c.selected)
    }

    /// Select exactly the choices whose value is in `values`; unknown values
    /// are ignored
    pub fn select_values<'a>(&mut self, values: impl IntoIterator<Item = &'a str>) {
        for choice in &mut self.choices {
            choice.selected = false;
        }
        for value in values {
            if let Some(choice) = self.choices.iter_mut().find(|c| c.value == value) {
                choice.selected = true;
            }
        }
    }
}

impl InputField for ListField {
    fn input(&self) -> &InputState {
        &self.input
    }

    fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    fn response(&self) -> String {
        self.selected()
            .map(|c| c.value.as_str())
            .collect::<Vec<_>>()
            .join(&self.response_delimiter)
            .trim()
            .to_string()
    }

    fn check(&self) -> Option<String> {
        if self.input.required && self.selected().next().is_none() {
            return Some(self.input.required_message.clone());
        }
        None
    }
}

/// A list field laid out vertically or horizontally
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientableField {
    pub list: ListField,
    pub orientation: Orientation,
    /// Class of the label next to each choice
    pub input_label_class: String,
    pub vertical_class: String,
    pub horizontal_class: String,
    pub list_class: String,
}

impl Default for OrientableField {
    fn default() -> Self {
        Self {
            list: ListField::default(),
            orientation: Orientation::Vertical,
            input_label_class: classes::LIST_INPUT_LABEL.into(),
            vertical_class: classes::VERTICAL.into(),
            horizontal_class: classes::HORIZONTAL.into(),
            list_class: classes::ORIENTABLE_LIST.into(),
        }
    }
}

impl OrientableField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, list: ListField) -> Self {
        self.list = list;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    fn render_items(&self, ctx: &RenderContext<'_>, input_type: &str) -> String {
        let ul = Tag::new("ul")
            .class(match self.orientation {
                Orientation::Vertical => &self.vertical_class,
                Orientation::Horizontal => &self.horizontal_class,
            })
            .class(&self.list_class);

        let mut out = ul.start_tag();
        for (i, choice) in self.list.choices.iter().enumerate() {
            let id = format!("{}{}", ctx.html_id, i);
            out.push_str("<li>");
            out.push_str(
                &Tag::new("input")
                    .attr("type", input_type)
                    .attr("name", ctx.html_id)
                    .attr("id", id.as_str())
                    .attr("value", choice.value.as_str())
                    .attr_if(choice.selected, "checked", "checked")
                    .merge(&self.list.input.input_attributes)
                    .merge(&choice.attributes)
                    .self_closing(),
            );
            out.push_str(
                &Tag::new("label")
                    .attr("for", id.as_str())
                    .class(&self.input_label_class)
                    .text(&choice.text)
                    .render(),
            );
            out.push_str("</li>");
        }
        out.push_str(&ul.end_tag());
        out
    }

    pub(crate) fn render_check_box_list(&self, template: &str, ctx: &RenderContext<'_>) -> String {
        let mut input = self.render_items(ctx, "checkbox");
        input.push_str(&always_posted(ctx));
        self.list.input.render(template, ctx, &input, false)
    }

    pub(crate) fn render_radio_list(&self, template: &str, ctx: &RenderContext<'_>) -> String {
        let input = self.render_items(ctx, "radio");
        self.list.input.render(template, ctx, &input, false)
    }
}

/// A drop down list or list box
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Select {
    pub list: ListField,
    /// Number of visible options
    pub size: u32,
    /// Accept multiple selections
    pub multiple: bool,
    /// Text of the valueless first option
    pub empty_option: Option<String>,
    pub show_empty_option: bool,
}

impl Default for Select {
    fn default() -> Self {
        Self {
            list: ListField::default(),
            size: 1,
            multiple: false,
            empty_option: None,
            show_empty_option: false,
        }
    }
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(mut self, list: ListField) -> Self {
        self.list = list;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn with_empty_option(mut self, text: impl Into<String>) -> Self {
        self.empty_option = Some(text.into());
        self.show_empty_option = true;
        self
    }

    pub(crate) fn render(&self, template: &str, ctx: &RenderContext<'_>) -> String {
        let select = Tag::new("select")
            .attr("id", ctx.html_id)
            .attr("name", ctx.html_id)
            .attr_if(self.size > 1, "size", self.size.to_string())
            .attr_if(self.multiple, "multiple", "multiple")
            .merge(&self.list.input.input_attributes);

        let mut input = select.start_tag();
        if self.show_empty_option {
            input.push_str(
                &Tag::new("option")
                    .attr("value", "")
                    .text(self.empty_option.as_deref().unwrap_or_default())
                    .render(),
            );
        }
        for choice in &self.list.choices {
            input.push_str(
                &Tag::new("option")
                    .attr("value", choice.value.as_str())
                    .attr_if(choice.selected, "selected", "selected")
                    .merge(&choice.attributes)
                    .text(&choice.text)
                    .render(),
            );
        }
        input.push_str(&select.end_tag());
        input.push_str(&always_posted(ctx));

        self.list.input.render(template, ctx, &input, true)
    }
}

/// Empty hidden input sharing the field's name so a value is always posted
fn always_posted(ctx: &RenderContext<'_>) -> String {
    Tag::new("input")
        .attr("type", "hidden")
        .attr("id", format!("{}_hidden", ctx.html_id))
        .attr("name", ctx.html_id)
        .attr("value", "")
        .self_closing()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> ListField {
        let mut list = ListField::new();
        list.add_choices("Red,Green,,Blue,Red", ",");
        list
    }

    #[test]
    fn test_add_choices_skips_empty_and_duplicates() {
        let list = colors();
        assert_eq!(list.comma_delimited_choices(), "Red,Green,Blue");
        assert_eq!(list.choices[1], ListItem::new("Green"));
    }

    #[test]
    fn test_set_comma_delimited_choices_replaces() {
        let mut list = colors();
        list.set_comma_delimited_choices("Yes,No");
        assert_eq!(list.choices.len(), 2);
    }

    #[test]
    fn test_response_joins_selected_values() {
        let mut list = colors();
        assert_eq!(list.response(), "");
        list.select_values(["Blue", "Red", "Purple"]);
        assert_eq!(list.response(), "Red, Blue");
        list.response_delimiter = "|".into();
        assert_eq!(list.response(), "Red|Blue");
    }

    #[test]
    fn test_required_needs_a_selection() {
        let mut list = colors();
        list.input.required = true;
        assert!(!list.validate("color"));
        assert_eq!(list.input.error.as_deref(), Some("Required"));

        list.select_values(["Green"]);
        assert!(list.validate("color"));
        assert!(list.input.error.is_none());
    }

    #[test]
    fn test_select_values_clears_previous() {
        let mut list = colors();
        list.select_values(["Red"]);
        list.select_values(["Green"]);
        let selected: Vec<_> = list.selected().map(|c| c.value.clone()).collect();
        assert_eq!(selected, vec!["Green"]);
    }
}
