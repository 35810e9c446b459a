//! Shell completion generation
//!
//! Any shell `clap_complete` supports can be requested; the two below are the
//! common setups.
//!
//! # Usage
//!
//! ```bash
//! # Bash - add to ~/.bashrc
//! source <(tdesk completions bash)
//!
//! # Fish
//! tdesk completions fish > ~/.config/fish/completions/tdesk.fish
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use miette::Result;
use std::io;

use crate::cli::Cli;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "tdesk", &mut io::stdout());
    Ok(())
}
