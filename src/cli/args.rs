//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, export::ExportArgs, init::InitArgs,
};

#[derive(Parser)]
#[command(name = "tdesk")]
#[command(author, version, about = "Translation desk")]
#[command(long_about = "A small toolkit for translator workspaces: hand-edited XLIFF files, plain-text source and target, and a glossary.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format for structured output
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose (debug) logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Workspace root (default: auto-detect by finding .tdesk/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a file's contents to stdout
    Export(ExportArgs),

    /// Initialize a translation workspace
    Init(InitArgs),

    /// View and change configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output, or the configured default_format
    #[default]
    Auto,
    /// YAML format
    Yaml,
    /// JSON format (for programming)
    Json,
}

impl OutputFormat {
    /// Resolve `Auto` against a configured default
    pub fn or_configured(self, configured: Option<&str>) -> Self {
        match self {
            OutputFormat::Auto => match configured {
                Some("yaml") => OutputFormat::Yaml,
                Some("json") => OutputFormat::Json,
                _ => OutputFormat::Auto,
            },
            other => other,
        }
    }
}
