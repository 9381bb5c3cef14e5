//! Free text fields: TextBox and TextArea

use super::input::{InputField, InputState};
use super::RenderContext;
use crate::html::Tag;
use crate::patterns;
use crate::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::warn;

/// State of a text box or text area
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextField {
    pub input: InputState,
    value: String,
    regular_expression: Option<String>,
    pub regex_message: String,
    /// `regular_expression` compiled; filled lazily after deserialization
    #[serde(skip)]
    compiled: OnceLock<Regex>,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            input: InputState::default(),
            value: String::new(),
            regular_expression: None,
            regex_message: "Invalid".into(),
            compiled: OnceLock::new(),
        }
    }
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Require responses to fully match `pattern`
    pub fn with_regex(mut self, pattern: &str, message: impl Into<String>) -> Result<Self> {
        self.set_regular_expression(Some(pattern))?;
        self.regex_message = message.into();
        Ok(self)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn regular_expression(&self) -> Option<&str> {
        self.regular_expression.as_deref()
    }

    /// Set or clear the validation pattern; it must compile
    pub fn set_regular_expression(&mut self, pattern: Option<&str>) -> Result<()> {
        match pattern.filter(|p| !p.is_empty()) {
            Some(p) => {
                self.compiled = OnceLock::from(patterns::anchored(p)?);
                self.regular_expression = Some(p.to_string());
            }
            None => {
                self.compiled = OnceLock::new();
                self.regular_expression = None;
            }
        }
        Ok(())
    }

    pub(crate) fn render_text_box(&self, template: &str, ctx: &RenderContext<'_>) -> String {
        let input = Tag::new("input")
            .attr("id", ctx.html_id)
            .attr("name", ctx.html_id)
            .attr("type", "text")
            .attr("value", self.value.as_str())
            .merge(&self.input.input_attributes)
            .self_closing();
        self.input.render(template, ctx, &input, true)
    }

    pub(crate) fn render_text_area(&self, template: &str, ctx: &RenderContext<'_>) -> String {
        let input = Tag::new("textarea")
            .attr("id", ctx.html_id)
            .attr("name", ctx.html_id)
            .merge(&self.input.input_attributes)
            .text(&self.value)
            .render();
        self.input.render(template, ctx, &input, true)
    }
}

impl InputField for TextField {
    fn input(&self) -> &InputState {
        &self.input
    }

    fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    fn response(&self) -> String {
        self.value.trim().to_string()
    }

    fn check(&self) -> Option<String> {
        let response = self.response();
        if response.is_empty() {
            return self.input.required.then(|| self.input.required_message.clone());
        }

        let pattern = self.regular_expression.as_deref()?;
        let re = match self.compiled.get() {
            Some(re) => re,
            None => match patterns::anchored(pattern) {
                Ok(re) => self.compiled.get_or_init(|| re),
                Err(e) => {
                    // only reachable through a hand-edited snapshot
                    warn!(error = %e, "Text field pattern does not compile");
                    return Some(self.regex_message.clone());
                }
            },
        };
        (!re.is_match(&response)).then(|| self.regex_message.clone())
    }
}
