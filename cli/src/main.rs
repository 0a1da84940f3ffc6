//! formctl
//!
//! Command-line front end for the form builder core.
//!
//! # Usage
//!
//! ```bash
//! formctl seed --format yaml > form.yaml
//! formctl kinds
//! formctl default-config linear_scale
//! formctl render --view builder --file form.yaml
//! formctl render --view fill --answer 2=0 --answer 5=4
//! formctl check --file form.json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "formctl")]
#[command(version)]
#[command(about = "Form builder command line interface", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, short, env = "FORMCTL_FORMAT")]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short, env = "FORMCTL_PROFILE")]
    profile: Option<String>,

    /// Log filter when RUST_LOG is unset
    #[arg(long, env = "FORMCTL_LOG")]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the demo document
    Seed,
    /// List the field kinds
    Kinds,
    /// Print the default config of a field kind
    DefaultConfig {
        /// Kind tag, e.g. multiple_choice
        kind: String,
    },
    /// Render a document through one of the views
    Render {
        #[arg(long, value_enum, default_value = "preview")]
        view: ViewKind,
        /// JSON or YAML document, the demo document when omitted
        #[arg(long)]
        file: Option<PathBuf>,
        /// Answer for the fill view as FIELD=VALUE, repeatable
        #[arg(long = "answer", value_name = "FIELD=VALUE")]
        answers: Vec<String>,
    },
    /// Report broken invariants in a document
    Check {
        #[arg(long)]
        file: PathBuf,
    },
    /// Configure the CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewKind {
    Builder,
    Preview,
    Fill,
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
    let cli = Cli::parse();

    let config = match config::Config::load(cli.profile.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    let filter = cli
        .log
        .as_deref()
        .or(config.log_filter.as_deref())
        .unwrap_or("warn");
    forms_common::telemetry::init(filter);

    let format = cli.format.or(config.format).unwrap_or_default();
    let profile = cli.profile.as_deref();

    let result = match cli.command {
        Commands::Seed => commands::seed::handle(format),
        Commands::Kinds => commands::kinds::handle(format),
        Commands::DefaultConfig { kind } => commands::default_config::handle(&kind, format),
        Commands::Render {
            view,
            file,
            answers,
        } => commands::render::handle(view, file.as_deref(), &answers, &config, format),
        Commands::Check { file } => commands::check::handle(&file, format),
        Commands::Config { action } => commands::config::handle(action, profile),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
