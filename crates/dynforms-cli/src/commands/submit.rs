//! Submit command
//!
//! Plays the browser: posts values and files against a form, rebinds,
//! validates and reports.

use super::Context;
use anyhow::{Context as _, Result};
use colored::Colorize;
use dynforms_core::config::SERIALIZED_FORM_FIELD;
use dynforms_core::{bind, Form, PostedData, PostedFile};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;
use tracing::{info, warn};

pub struct SubmitArgs {
    pub definition: Option<PathBuf>,
    pub snapshot: Option<String>,
    pub posts: Vec<(String, String)>,
    pub files: Vec<(String, PostedFile)>,
    pub completed_only: bool,
    pub all: bool,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ResponseRow {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ErrorRow {
    pub key: String,
    pub title: String,
    pub error: String,
}

fn validation_errors(form: &Form) -> Vec<ErrorRow> {
    form.input_fields()
        .filter_map(|f| {
            f.error().map(|error| ErrorRow {
                key: f.key().to_string(),
                title: f.response_title().unwrap_or(f.key()).to_string(),
                error: error.to_string(),
            })
        })
        .collect()
}

/// Returns whether the submission validated
pub fn handle(ctx: &Context, args: SubmitArgs) -> Result<bool> {
    let mut posted = PostedData::new();
    for (key, value) in args.posts {
        posted.insert(key, value);
    }
    for (key, file) in args.files {
        posted.insert_file(key, file);
    }

    // a snapshot travels with the post, exactly as the hidden input would
    let form = match args.snapshot {
        Some(snapshot) => {
            posted.insert(SERIALIZED_FORM_FIELD, snapshot);
            None
        }
        None => Some(ctx.definition(args.definition.as_deref())?.build()?),
    };

    let mut form = bind(form, &posted).context("Failed to bind posted data")?;
    let is_valid = form.validate(!args.all);
    info!(form_id = %form.id(), is_valid, "Submitted form");

    if !is_valid {
        let errors = validation_errors(&form);
        warn!(errors = errors.len(), "Submission failed validation");
        eprintln!(
            "{} {} field(s) failed validation",
            "✗".red().bold(),
            errors.len()
        );
        ctx.format.print_rows(&errors)?;
        return Ok(false);
    }

    let responses: Vec<ResponseRow> = form
        .responses(args.completed_only)
        .into_iter()
        .map(|r| ResponseRow {
            title: r.title,
            value: r.value,
        })
        .collect();
    eprintln!("{} {} response(s)", "✓".green().bold(), responses.len());
    ctx.format.print_rows(&responses)?;
    Ok(true)
}
