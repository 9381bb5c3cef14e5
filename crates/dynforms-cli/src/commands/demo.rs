//! Demo command

use super::{Context, DEMO_DEFINITION};
use anyhow::Result;
use dynforms_core::FormDefinition;

/// Print the built-in demo definition, a starting point for custom forms
pub fn handle(ctx: &Context) -> Result<()> {
    let definition: FormDefinition = toml::from_str(DEMO_DEFINITION)?;
    ctx.format.print_document(&definition, DEMO_DEFINITION.trim_end())
}
