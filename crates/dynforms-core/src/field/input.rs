//! Shared state and behaviour of fields that accept a response

use super::RenderContext;
use crate::config::classes;
use crate::events::{FieldEvent, Hooks};
use crate::html::Tag;
use crate::placeholder::{PlaceHolder, Substitution};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// State common to every input field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    /// The question asked of the end user
    pub prompt: Option<String>,
    /// Identifies the field among the end user's responses
    pub response_title: Option<String>,
    pub required: bool,
    pub required_message: String,
    pub error: Option<String>,
    pub prompt_class: String,
    pub error_class: String,
    /// Attributes rendered on every input element of the field
    pub input_attributes: BTreeMap<String, String>,
    #[serde(skip)]
    pub(crate) hooks: Hooks,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            prompt: None,
            response_title: None,
            required: false,
            required_message: "Required".into(),
            error: None,
            prompt_class: classes::PROMPT.into(),
            error_class: classes::ERROR.into(),
            input_attributes: BTreeMap::new(),
            hooks: Hooks::default(),
        }
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

impl InputState {
    pub fn error_is_clear(&self) -> bool {
        non_empty(&self.error).is_none()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Prompt label text: prompt, else response title, else key
    pub fn prompt_text<'a>(&'a self, key: &'a str) -> &'a str {
        non_empty(&self.prompt)
            .or_else(|| non_empty(&self.response_title))
            .unwrap_or(key)
    }

    /// Response title: response title, else prompt, else key
    pub fn title<'a>(&'a self, key: &'a str) -> &'a str {
        non_empty(&self.response_title)
            .or_else(|| non_empty(&self.prompt))
            .unwrap_or(key)
    }

    /// Registered validated-hooks
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    pub(crate) fn prompt_label(&self, ctx: &RenderContext<'_>, labelled: bool) -> String {
        Tag::new("label")
            .class(&self.prompt_class)
            .attr_if(labelled, "for", ctx.html_id)
            .text(self.prompt_text(ctx.key))
            .render()
    }

    pub(crate) fn error_label(&self, ctx: &RenderContext<'_>, labelled: bool) -> String {
        match non_empty(&self.error) {
            Some(error) => Tag::new("label")
                .class(&self.error_class)
                .attr_if(labelled, "for", ctx.html_id)
                .text(error)
                .render(),
            None => String::new(),
        }
    }

    /// Fill `template` with prompt, error, input and wrapper id
    pub(crate) fn render(
        &self,
        template: &str,
        ctx: &RenderContext<'_>,
        input: &str,
        labelled: bool,
    ) -> String {
        let prompt = self.prompt_label(ctx, labelled);
        let error = self.error_label(ctx, labelled);
        Substitution::new()
            .with(PlaceHolder::Prompt, &prompt)
            .with(PlaceHolder::Error, &error)
            .with(PlaceHolder::Input, input)
            .with(PlaceHolder::FieldWrapperId, ctx.wrapper_id)
            .apply(template)
    }
}

/// A field that accepts and validates a user response
pub trait InputField {
    fn input(&self) -> &InputState;

    fn input_mut(&mut self) -> &mut InputState;

    /// The user's response as text
    fn response(&self) -> String;

    /// Error message for the current state, `None` when valid
    fn check(&self) -> Option<String>;

    /// Clear the previous error, record the new one and notify hooks
    fn validate(&mut self, key: &str) -> bool {
        let error = self.check();
        let input = self.input_mut();
        input.clear_error();
        input.error = error;
        let is_valid = input.error_is_clear();
        input.hooks.fire(&FieldEvent::Validated {
            key: key.to_string(),
            is_valid,
        });
        is_valid
    }
}

/// `<div class="DynFieldWrapper" id="{FieldWrapperId}">` around the given placeholders
pub(crate) fn wrapper_template(parts: &[PlaceHolder]) -> String {
    let inner: String = parts.iter().map(|p| p.token()).collect();
    Tag::new("div")
        .class(classes::FIELD_WRAPPER)
        .attr("id", PlaceHolder::FieldWrapperId.token())
        .inner_html(inner)
        .render()
}

/// Prompt, error, input
pub(crate) fn default_template() -> String {
    wrapper_template(&[PlaceHolder::Prompt, PlaceHolder::Error, PlaceHolder::Input])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_and_title_fallbacks() {
        let mut input = InputState::default();
        assert_eq!(input.prompt_text("k"), "k");
        assert_eq!(input.title("k"), "k");

        input.response_title = Some("Title".into());
        assert_eq!(input.prompt_text("k"), "Title");
        assert_eq!(input.title("k"), "Title");

        input.prompt = Some("Prompt?".into());
        assert_eq!(input.prompt_text("k"), "Prompt?");
        assert_eq!(input.title("k"), "Title");

        input.response_title = Some(String::new());
        assert_eq!(input.title("k"), "Prompt?");
    }

    #[test]
    fn test_error_is_clear() {
        let mut input = InputState::default();
        assert!(input.error_is_clear());
        input.error = Some(String::new());
        assert!(input.error_is_clear());
        input.error = Some("Required".into());
        assert!(!input.error_is_clear());
        input.clear_error();
        assert!(input.error.is_none());
    }

    #[test]
    fn test_default_template_layout() {
        let t = default_template();
        let prompt = t.find(PlaceHolder::Prompt.token()).unwrap();
        let error = t.find(PlaceHolder::Error.token()).unwrap();
        let input = t.find(PlaceHolder::Input.token()).unwrap();
        assert!(prompt < error && error < input);
        assert!(t.starts_with("<div class=\"DynFieldWrapper\" id=\"{FieldWrapperId:"));
    }
}
