//! Literal markup field

use super::RenderContext;
use crate::placeholder::{PlaceHolder, Substitution};
use serde::{Deserialize, Serialize};

/// Raw markup rendered as is. Display only: never validated, no response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Literal {
    pub html: String,
}

impl Literal {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub(crate) fn render(&self, template: &str, ctx: &RenderContext<'_>) -> String {
        Substitution::new()
            .with(PlaceHolder::Literal, &self.html)
            .with(PlaceHolder::FieldWrapperId, ctx.wrapper_id)
            .apply(template)
    }
}
