//! DynForms CLI
//!
//! Command-line host for dynamic forms: renders a form definition and
//! plays the browser side of a submission.
//!
//! # Usage
//!
//! ```bash
//! dynforms demo > survey.toml
//! dynforms render --definition survey.toml --pretty
//! dynforms submit -d survey.toml --post DynField_name="Jane Doe" --file DynField_photo=me.png:2048
//! dynforms submit --snapshot "$SNAPSHOT" --post DynField_agree=True --format json
//! dynforms config set default_format json
//! ```

use clap::{Parser, Subcommand};
use dynforms_core::PostedFile;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "dynforms")]
#[command(author = "DynForms")]
#[command(version)]
#[command(about = "DynForms Command Line Interface", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, short, global = true, env = "DYNFORMS_FORMAT")]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short, global = true, env = "DYNFORMS_PROFILE")]
    profile: Option<String>,

    /// Prefix of rendered field ids and names
    #[arg(long, global = true, env = "DYNFORMS_FIELD_PREFIX")]
    field_prefix: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a form definition to markup
    Render {
        /// TOML or JSON form definition (default: configured file, else the demo form)
        #[arg(short, long)]
        definition: Option<PathBuf>,
        /// Indent the markup
        #[arg(long)]
        pretty: bool,
        /// Embed a form snapshot for the next round trip
        #[arg(long)]
        serialize: bool,
    },
    /// Post data to a form, validate it and print responses or errors
    Submit {
        /// TOML or JSON form definition
        #[arg(short, long, conflicts_with = "snapshot")]
        definition: Option<PathBuf>,
        /// Snapshot from a rendered DynSerializedForm input
        #[arg(long)]
        snapshot: Option<String>,
        /// Posted value, repeatable: NAME=VALUE
        #[arg(long = "post", value_name = "NAME=VALUE", value_parser = commands::parse_key_value)]
        posts: Vec<(String, String)>,
        /// Uploaded file, repeatable: NAME=FILE[:SIZE]
        #[arg(long = "file", value_name = "NAME=FILE[:SIZE]", value_parser = commands::parse_posted_file)]
        files: Vec<(String, PostedFile)>,
        /// Skip empty responses
        #[arg(long)]
        completed_only: bool,
        /// Validate fields that are not displayed too
        #[arg(long)]
        all: bool,
    },
    /// Print the demo form definition
    Demo,
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config not loaded, using defaults: {:#}", e);
        config::Config::default()
    });
    let ctx = commands::Context {
        format: cli
            .format
            .or(config.default_format)
            .unwrap_or(output::OutputFormat::Table),
        profile: cli.profile,
        config,
        field_prefix: cli.field_prefix,
    };

    let result = match cli.command {
        Commands::Render {
            definition,
            pretty,
            serialize,
        } => commands::render::handle(&ctx, definition, pretty, serialize).map(|_| true),
        Commands::Submit {
            definition,
            snapshot,
            posts,
            files,
            completed_only,
            all,
        } => commands::submit::handle(
            &ctx,
            commands::submit::SubmitArgs {
                definition,
                snapshot,
                posts,
                files,
                completed_only,
                all,
            },
        ),
        Commands::Demo => commands::demo::handle(&ctx).map(|_| true),
        Commands::Config { action } => commands::config::handle(action, &ctx).map(|_| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
