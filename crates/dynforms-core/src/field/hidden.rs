//! Hidden input field

use super::input::{InputField, InputState};
use super::RenderContext;
use crate::html::Tag;
use crate::placeholder::{PlaceHolder, Substitution};
use serde::{Deserialize, Serialize};

/// A hidden input. Carries a value through the round trip; never invalid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hidden {
    pub input: InputState,
    pub value: String,
}

impl Hidden {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            input: InputState::default(),
            value: value.into(),
        }
    }

    pub(crate) fn render(&self, template: &str, ctx: &RenderContext<'_>) -> String {
        let input = Tag::new("input")
            .attr("id", ctx.html_id)
            .attr("name", ctx.html_id)
            .attr("type", "hidden")
            .attr("value", self.value.as_str())
            .merge(&self.input.input_attributes)
            .self_closing();

        Substitution::new()
            .with(PlaceHolder::Input, &input)
            .with(PlaceHolder::FieldWrapperId, ctx.wrapper_id)
            .apply(template)
    }
}

impl InputField for Hidden {
    fn input(&self) -> &InputState {
        &self.input
    }

    fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    fn response(&self) -> String {
        self.value.clone()
    }

    fn check(&self) -> Option<String> {
        None
    }
}
