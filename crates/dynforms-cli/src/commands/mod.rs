//! CLI Commands

pub mod config;
pub mod demo;
pub mod render;
pub mod submit;

use crate::config::Config;
use crate::output::OutputFormat;
use anyhow::{bail, Context as _, Result};
use dynforms_core::{FormDefinition, PostedFile};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Built-in definition used when none is configured
pub const DEMO_DEFINITION: &str = include_str!("../demo.toml");

/// Settings shared by every command
pub struct Context {
    pub format: OutputFormat,
    pub profile: Option<String>,
    pub config: Config,
    pub field_prefix: Option<String>,
}

impl Context {
    /// Definition from `path`, the configured file, or the demo, with
    /// prefix overrides applied
    pub fn definition(&self, path: Option<&Path>) -> Result<FormDefinition> {
        let path: Option<PathBuf> = path
            .map(Path::to_path_buf)
            .or_else(|| self.config.definition.clone());

        let mut definition = match path {
            Some(path) => load_definition(&path)?,
            None => toml::from_str(DEMO_DEFINITION).context("Built-in demo definition is invalid")?,
        };

        if let Some(prefix) = self.field_prefix.clone().or_else(|| self.config.field_prefix.clone()) {
            definition.form.field_prefix = prefix;
        }
        if let Some(var) = &self.config.data_script_var {
            definition.form.data_script_var = var.clone();
        }
        Ok(definition)
    }
}

/// Read a TOML or JSON definition, chosen by file extension
pub fn load_definition(path: &Path) -> Result<FormDefinition> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    debug!(path = %path.display(), "Loading form definition");
    let definition = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        _ => toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
    };
    Ok(definition)
}

/// `KEY=VALUE`
pub fn parse_key_value(arg: &str) -> Result<(String, String)> {
    let Some((key, value)) = arg.split_once('=') else {
        bail!("expected KEY=VALUE, got \"{}\"", arg);
    };
    if key.is_empty() {
        bail!("empty key in \"{}\"", arg);
    }
    Ok((key.to_string(), value.to_string()))
}

/// `KEY=NAME[:SIZE]`
pub fn parse_posted_file(arg: &str) -> Result<(String, PostedFile)> {
    let (key, target) = parse_key_value(arg)?;
    let file = match target.rsplit_once(':') {
        Some((name, size)) if !size.is_empty() && size.bytes().all(|b| b.is_ascii_digit()) => {
            let mut file = PostedFile::new(name);
            file.size = size.parse().with_context(|| format!("invalid size in \"{}\"", arg))?;
            file
        }
        _ => PostedFile::new(target.as_str()),
    };
    if file.file_name.is_empty() {
        bail!("empty file name in \"{}\"", arg);
    }
    Ok((key, file))
}
