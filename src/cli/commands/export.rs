//! `tdesk export` command - print a file's contents verbatim
//!
//! stdout receives `Exporting to <file>` followed by the file's bytes. On
//! failure the status line is still printed; the error goes to stderr and
//! the process exits non-zero.

use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::core::export;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// File to export (relative paths resolve against the current directory)
    #[arg(value_name = "FILE", required_unless_present = "file_flag")]
    pub file: Option<PathBuf>,

    /// File to export, as a named option
    #[arg(long = "file", value_name = "FILE", conflicts_with = "file")]
    pub file_flag: Option<PathBuf>,
}

impl ExportArgs {
    /// The path as supplied, whichever form was used
    pub fn target(&self) -> Option<&Path> {
        self.file.as_deref().or(self.file_flag.as_deref())
    }
}

pub fn run(args: ExportArgs, _global: &GlobalOpts) -> Result<()> {
    let file = args
        .target()
        .ok_or_else(|| miette::miette!("no file given to export"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    export_to(file, &mut out)
}

/// Write the status line and the file's contents to `out`
pub fn export_to(file: &Path, out: &mut impl Write) -> Result<()> {
    out.write_all(export::status_line(file).as_bytes())
        .into_diagnostic()?;
    // The status line must be visible even if the read fails
    out.flush().into_diagnostic()?;

    let contents = export::read_export(file)?;

    out.write_all(contents.as_bytes()).into_diagnostic()?;
    out.flush().into_diagnostic()?;

    tracing::info!(file = %file.display(), bytes = contents.len(), "exported");
    Ok(())
}
