//! Config commands

use super::Context;
use crate::config::Config;
use crate::output::OutputFormat;
use crate::ConfigCommands;
use anyhow::{bail, Result};
use clap::ValueEnum;

fn show<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "(not set)".into())
}

pub fn handle(action: ConfigCommands, ctx: &Context) -> Result<()> {
    let profile = ctx.profile.as_deref();
    match action {
        ConfigCommands::Init => {
            let path = Config::default().save(profile)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile).unwrap_or_default();
            match key.as_str() {
                "definition" => config.definition = Some(value.into()),
                "field_prefix" => config.field_prefix = Some(value),
                "data_script_var" => config.data_script_var = Some(value),
                "default_format" => {
                    let format = OutputFormat::from_str(&value, true)
                        .map_err(|e| anyhow::anyhow!("Invalid format {}: {}", value, e))?;
                    config.default_format = Some(format);
                }
                _ => bail!("Unknown config key: {}", key),
            }
            config.save(profile)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile)?;
            let value = match key.as_str() {
                "definition" => show(config.definition.map(|p| p.display().to_string())),
                "field_prefix" => show(config.field_prefix),
                "data_script_var" => show(config.data_script_var),
                "default_format" => show(config.default_format.map(|f| format!("{:?}", f).to_lowercase())),
                _ => bail!("Unknown config key: {}", key),
            };
            println!("{}: {}", key, value);
        }
        ConfigCommands::List => {
            let config = Config::load(profile)?;
            println!("definition: {}", show(config.definition.map(|p| p.display().to_string())));
            println!("field_prefix: {}", show(config.field_prefix));
            println!("data_script_var: {}", show(config.data_script_var));
            println!(
                "default_format: {}",
                show(config.default_format.map(|f| format!("{:?}", f).to_lowercase()))
            );
        }
    }
    Ok(())
}
