//! Single checkbox field

use super::input::{wrapper_template, InputField, InputState};
use super::RenderContext;
use crate::config::classes;
use crate::html::Tag;
use crate::placeholder::PlaceHolder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckBox {
    pub input: InputState,
    pub checked: bool,
    /// Response when checked
    pub checked_value: String,
    /// Response when not checked
    pub unchecked_value: String,
}

impl Default for CheckBox {
    fn default() -> Self {
        let mut input = InputState::default();
        input.prompt_class = classes::CHECKBOX_PROMPT.into();
        Self {
            input,
            checked: false,
            checked_value: "Yes".into(),
            unchecked_value: "No".into(),
        }
    }
}

impl CheckBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_values(mut self, checked: impl Into<String>, unchecked: impl Into<String>) -> Self {
        self.checked_value = checked.into();
        self.unchecked_value = unchecked.into();
        self
    }

    /// Error, input, prompt: the label sits after the box
    pub(crate) fn default_template() -> String {
        wrapper_template(&[PlaceHolder::Error, PlaceHolder::Input, PlaceHolder::Prompt])
    }

    pub(crate) fn render(&self, template: &str, ctx: &RenderContext<'_>) -> String {
        let mut input = Tag::new("input")
            .attr("id", ctx.html_id)
            .attr("name", ctx.html_id)
            .attr("type", "checkbox")
            .attr_if(self.checked, "checked", "checked")
            .attr("value", "True")
            .merge(&self.input.input_attributes)
            .self_closing();

        // unchecked boxes are not posted; the hidden input always is
        input.push_str(
            &Tag::new("input")
                .attr("type", "hidden")
                .attr("id", format!("{}_hidden", ctx.html_id))
                .attr("name", ctx.html_id)
                .attr("value", "False")
                .self_closing(),
        );

        self.input.render(template, ctx, &input, true)
    }
}

impl InputField for CheckBox {
    fn input(&self) -> &InputState {
        &self.input
    }

    fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    fn response(&self) -> String {
        if self.checked {
            self.checked_value.clone()
        } else {
            self.unchecked_value.clone()
        }
    }

    fn check(&self) -> Option<String> {
        (self.input.required && !self.checked).then(|| self.input.required_message.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_values() {
        let mut agree = CheckBox::new().with_values("Agreed", "Declined");
        assert_eq!(agree.response(), "Declined");
        agree.checked = true;
        assert_eq!(agree.response(), "Agreed");
    }

    #[test]
    fn test_required_must_be_checked() {
        let mut agree = CheckBox::new();
        agree.input.required = true;
        agree.input.required_message = "You must agree".into();
        assert!(!agree.validate("agree"));
        assert_eq!(agree.input.error.as_deref(), Some("You must agree"));

        agree.checked = true;
        assert!(agree.validate("agree"));
    }

    #[test]
    fn test_checkbox_prompt_class() {
        assert_eq!(CheckBox::new().input.prompt_class, classes::CHECKBOX_PROMPT);
    }
}
