//! Render command

use super::Context;
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Serialize)]
struct Rendered {
    form_id: String,
    fields: usize,
    html: String,
}

pub fn handle(ctx: &Context, definition: Option<PathBuf>, pretty: bool, serialize: bool) -> Result<()> {
    let mut form = ctx.definition(definition.as_deref())?.build()?;
    if serialize {
        form.set_serialize(true);
    }

    let html = form.render_html(pretty)?;
    info!(form_id = %form.id(), fields = form.fields().len(), "Rendered form");

    let rendered = Rendered {
        form_id: form.id().to_string(),
        fields: form.fields().len(),
        html,
    };
    ctx.format.print_document(&rendered, &rendered.html)
}
