//! `tdesk config` command - Configuration management
//!
//! Provides commands to view and modify tdesk configuration.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::{has_settings, validate_entry, VALID_KEYS};
use crate::core::project::Project;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path(PathArgs),

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,

    /// Show only project-level config
    #[arg(long = "project-only", conflicts_with = "global_only")]
    pub project_only: bool,

    /// Show only global (user) config
    #[arg(long = "global-only")]
    pub global_only: bool,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., color, log_level)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of project config
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of project config
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct PathArgs {
    /// Show only project config path
    #[arg(long = "project-only", conflicts_with = "global_only")]
    pub project_only: bool,

    /// Show only global config path
    #[arg(long = "global-only")]
    pub global_only: bool,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Set(args) => run_set(args, global),
        ConfigCommands::Unset(args) => run_unset(args, global),
        ConfigCommands::Path(args) => run_path(args, global),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = if args.project_only {
        Config::read_file(&get_project_config_path(global)?)?
    } else if args.global_only {
        let path = get_global_config_path()?;
        if path.exists() {
            Config::read_file(&path)?
        } else {
            Config::default()
        }
    } else {
        Config::load_from(global.project.as_deref()).0
    };

    if let Some(key) = &args.key {
        if !VALID_KEYS.iter().any(|(k, _)| *k == key.as_str()) {
            return Err(crate::core::ConfigError::UnknownKey(key.clone()).into());
        }
        return match config.get(key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    match global.format.or_configured(config.default_format.as_deref()) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&config).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Auto => {
            let title = if args.project_only {
                "Project Configuration"
            } else if args.global_only {
                "Global Configuration"
            } else {
                "Effective Configuration"
            };
            println!("{}", style(title).bold().underlined());
            println!();

            for (key, _) in VALID_KEYS {
                print_config_value(key, config.get(key));
            }

            if !args.project_only && !args.global_only && !global.quiet {
                println!();
                println!("{}", style("Config Sources (in priority order):").dim());
                println!("  1. Environment variables (TDESK_LOG_LEVEL, TDESK_COLOR)");
                println!("  2. Project config (.tdesk/config.yaml)");
                println!("  3. Global config (~/.config/tdesk/config.yaml)");
            }
        }
    }

    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    validate_entry(&args.key, &args.value)?;

    let config_path = if args.global {
        get_global_config_path()?
    } else {
        get_project_config_path(global)?
    };

    let mut config_map = load_mapping(&config_path)?;
    config_map.insert(
        serde_yml::Value::String(args.key.clone()),
        serde_yml::Value::String(args.value.clone()),
    );

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;
    tracing::debug!(path = %config_path.display(), key = %args.key, "config updated");

    if !global.quiet {
        let scope = if args.global { "global" } else { "project" };
        println!(
            "{} Set {} {} {} in {} config",
            style("✓").green(),
            style(&args.key).cyan(),
            style("→").dim(),
            style(&args.value).yellow(),
            scope
        );
    }

    Ok(())
}

fn run_unset(args: UnsetArgs, global: &GlobalOpts) -> Result<()> {
    let config_path = if args.global {
        get_global_config_path()?
    } else {
        get_project_config_path(global)?
    };

    if !config_path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            config_path.display()
        ));
    }

    let mut config_map = load_mapping(&config_path)?;
    let removed = config_map
        .remove(&serde_yml::Value::String(args.key.clone()))
        .is_some();

    if !removed {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    if !global.quiet {
        let scope = if args.global { "global" } else { "project" };
        println!(
            "{} Removed {} from {} config",
            style("✓").green(),
            style(&args.key).cyan(),
            scope
        );
    }

    Ok(())
}

fn run_path(args: PathArgs, global: &GlobalOpts) -> Result<()> {
    if args.project_only {
        let path = get_project_config_path(global)?;
        println!("{}", path.display());
        return Ok(());
    }
    if args.global_only {
        let path = get_global_config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    let global_path = get_global_config_path()?;
    let project_path = get_project_config_path(global);

    println!("{}", style("Configuration file paths:").bold());
    println!();
    println!("  {} {}", style("Global:").cyan(), global_path.display());
    print_exists(&global_path, 9);

    println!();
    match project_path {
        Ok(path) => {
            println!("  {} {}", style("Project:").cyan(), path.display());
            print_exists(&path, 10);
        }
        Err(_) => {
            println!(
                "  {} {}",
                style("Project:").cyan(),
                style("(not in a tdesk workspace)").dim()
            );
        }
    }

    Ok(())
}

fn run_keys() -> Result<()> {
    let mut table = Builder::default();
    table.push_record(["Key", "Description"]);
    for (key, description) in VALID_KEYS {
        table.push_record([*key, *description]);
    }
    println!("{}", table.build().with(Style::rounded()));

    println!();
    println!(
        "{}",
        style("Use 'tdesk config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

// Helper functions

fn get_global_config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))
}

fn get_project_config_path(global: &GlobalOpts) -> Result<PathBuf> {
    let project = match &global.project {
        Some(dir) => Project::discover_from(dir)?,
        None => Project::discover()?,
    };
    Ok(project.config_path())
}

/// Read a config file as a YAML mapping, treating missing or empty files as empty
fn load_mapping(path: &Path) -> Result<serde_yml::Mapping> {
    if !path.exists() {
        return Ok(serde_yml::Mapping::new());
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    match serde_yml::from_str::<serde_yml::Value>(&content) {
        Ok(serde_yml::Value::Mapping(map)) => Ok(map),
        Ok(serde_yml::Value::Null) => Ok(serde_yml::Mapping::new()),
        Ok(_) => Err(miette::miette!(
            "{} is not a key/value mapping",
            path.display()
        )),
        // Comment-only files (the init template) fail to parse as a document
        Err(_) if !has_settings(&content) => Ok(serde_yml::Mapping::new()),
        Err(e) => Err(miette::miette!("malformed config {}: {}", path.display(), e)),
    }
}

fn print_config_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}

fn print_exists(path: &Path, indent: usize) {
    let marker = if path.exists() {
        style("(exists)").green()
    } else {
        style("(not created)").dim()
    };
    println!("{:indent$}{}", "", marker, indent = indent);
}
