//! `tdesk init` command - Initialize a translation workspace

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::core::project::{Project, ProjectError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Rewrite .tdesk/config.yaml even if the workspace already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        if !global.quiet {
            println!(
                "{} Created directory {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            let created = project.scaffold()?;
            tracing::info!(root = %project.root().display(), files = created.len(), "workspace initialized");

            if global.quiet {
                return Ok(());
            }

            println!(
                "{} Initialized tdesk workspace at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            print_created(project.root(), &created);
            println!();
            println!("Next steps:");
            println!(
                "  {} Read the translator conventions",
                style("tdesk export TRANSLATING.md").yellow()
            );
            println!(
                "  {} Put the source text in place and start translation.xml",
                style("src.txt").yellow()
            );
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            if !global.quiet {
                println!(
                    "{} tdesk workspace already exists at {}",
                    style("!").yellow(),
                    style(path.display()).cyan()
                );
                println!();
                println!(
                    "Use {} to reinitialize",
                    style("tdesk init --force").yellow()
                );
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_created(root: &Path, created: &[PathBuf]) {
    println!();
    println!("Created:");
    println!("  {}", style(".tdesk/config.yaml").dim());
    for path in created {
        let shown = path.strip_prefix(root).unwrap_or(path);
        println!("  {}", style(shown.display()).dim());
    }
}
