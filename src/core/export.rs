//! File export - read a file and hand its text back verbatim
//!
//! The export operation is deliberately opaque: whatever the file holds
//! (an XLIFF document, `src.txt`, a glossary) is returned untouched. The
//! caller owns formatting and exit-status policy.

use miette::Diagnostic;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Broad classification of an export failure
///
/// Only used to pick a help message; every kind is reported the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    PermissionDenied,
    InvalidEncoding,
    IsDirectory,
    Other,
}

impl FailureKind {
    /// Classify an I/O error raised while resolving or reading
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FailureKind::NotFound,
            io::ErrorKind::PermissionDenied => FailureKind::PermissionDenied,
            io::ErrorKind::InvalidData => FailureKind::InvalidEncoding,
            io::ErrorKind::IsADirectory => FailureKind::IsDirectory,
            _ => FailureKind::Other,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::NotFound => "not found",
            FailureKind::PermissionDenied => "permission denied",
            FailureKind::InvalidEncoding => "invalid encoding",
            FailureKind::IsDirectory => "is a directory",
            FailureKind::Other => "unreadable",
        };
        write!(f, "{}", s)
    }
}

/// A failed export, carrying the path exactly as the user supplied it
#[derive(Debug, Error, Diagnostic)]
#[error("cannot export {}: {}", .path.display(), .kind)]
#[diagnostic()]
pub struct ExportError {
    /// Path as given on the command line
    path: PathBuf,

    /// Absolute path that was actually opened (None if resolution failed)
    resolved: Option<PathBuf>,

    kind: FailureKind,

    #[source]
    source: io::Error,

    #[help]
    help: Option<String>,
}

impl ExportError {
    fn new(path: &Path, resolved: Option<PathBuf>, source: io::Error) -> Self {
        let kind = FailureKind::from_io(&source);
        let help = generate_help(kind, resolved.as_deref());
        Self {
            path: path.to_path_buf(),
            resolved,
            kind,
            source,
            help,
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolved(&self) -> Option<&Path> {
        self.resolved.as_deref()
    }
}

/// The line printed before any file contents
pub fn status_line(path: &Path) -> String {
    format!("Exporting to {}\n", path.display())
}

/// Resolve `path` against `base`
///
/// Absolute paths pass through unchanged; relative ones are joined to `base`.
/// No normalisation of `..` or symlinks happens here, the OS does that on open.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Read a file for export, resolving relative paths against the working directory
pub fn read_export(path: &Path) -> Result<String, ExportError> {
    if path.is_absolute() {
        return read_resolved(path, path.to_path_buf());
    }
    let base = std::env::current_dir().map_err(|e| ExportError::new(path, None, e))?;
    read_export_from(path, &base)
}

/// Read a file for export, resolving relative paths against `base`
pub fn read_export_from(path: &Path, base: &Path) -> Result<String, ExportError> {
    read_resolved(path, resolve_path(path, base))
}

fn read_resolved(given: &Path, resolved: PathBuf) -> Result<String, ExportError> {
    tracing::debug!(path = %resolved.display(), "reading export source");

    match std::fs::read_to_string(&resolved) {
        Ok(contents) => {
            tracing::debug!(bytes = contents.len(), "export source read");
            Ok(contents)
        }
        Err(e) => {
            tracing::debug!(error = %e, "export source unreadable");
            Err(ExportError::new(given, Some(resolved), e))
        }
    }
}

fn generate_help(kind: FailureKind, resolved: Option<&Path>) -> Option<String> {
    match (kind, resolved) {
        (FailureKind::NotFound, Some(resolved)) => {
            Some(format!("looked for {}", resolved.display()))
        }
        (FailureKind::PermissionDenied, _) => {
            Some("check that the file is readable by the current user".to_string())
        }
        (FailureKind::InvalidEncoding, _) => {
            Some("only UTF-8 text files can be exported".to_string())
        }
        (FailureKind::IsDirectory, _) => Some("pass a file, not a directory".to_string()),
        (_, None) => Some("the current working directory could not be determined".to_string()),
        _ => None,
    }
}
