//! Project discovery and workspace scaffolding

use miette::Diagnostic;
use rust_embed::Embed;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the marker directory at a workspace root
pub const MARKER_DIR: &str = ".tdesk";

#[derive(Embed)]
#[folder = "templates/"]
struct WorkspaceTemplates;

/// Files written into a new workspace, paired with the template they come from.
/// `None` means the file starts empty.
const SCAFFOLD_FILES: &[(&str, Option<&str>)] = &[
    ("TRANSLATING.md", Some("TRANSLATING.md")),
    ("glossary.tsv", Some("glossary.tsv")),
    ("src.txt", None),
    ("tgt.txt", None),
];

/// Represents a translation workspace
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .tdesk/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(ProjectError::Io)?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start.canonicalize().map_err(ProjectError::Io)?;

        loop {
            if current.join(MARKER_DIR).is_dir() {
                tracing::debug!(root = %current.display(), "discovered project");
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new workspace at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if root.join(MARKER_DIR).exists() {
            return Err(ProjectError::AlreadyExists(root));
        }

        Self::write_marker(&root)?;
        Ok(Self { root })
    }

    /// Initialize even if .tdesk/ exists, rewriting the project config
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::write_marker(&root)?;
        Ok(Self { root })
    }

    fn write_marker(root: &Path) -> Result<(), ProjectError> {
        let marker = root.join(MARKER_DIR);
        std::fs::create_dir_all(&marker).map_err(ProjectError::Io)?;
        std::fs::write(marker.join("config.yaml"), template_bytes("config.yaml")?)
            .map_err(ProjectError::Io)?;
        Ok(())
    }

    /// Write the translator guidelines and companion files
    ///
    /// Files that already exist are left alone. Returns the files created.
    pub fn scaffold(&self) -> Result<Vec<PathBuf>, ProjectError> {
        let mut created = Vec::new();

        for (name, template) in SCAFFOLD_FILES {
            let path = self.root.join(name);
            if path.exists() {
                tracing::debug!(path = %path.display(), "keeping existing file");
                continue;
            }

            let contents = match template {
                Some(t) => template_bytes(t)?,
                None => Vec::new(),
            };
            std::fs::write(&path, contents).map_err(ProjectError::Io)?;
            created.push(path);
        }

        Ok(created)
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .tdesk configuration directory
    pub fn tdesk_dir(&self) -> PathBuf {
        self.root.join(MARKER_DIR)
    }

    /// Path of the project-level config file
    pub fn config_path(&self) -> PathBuf {
        self.tdesk_dir().join("config.yaml")
    }
}

fn template_bytes(name: &str) -> Result<Vec<u8>, ProjectError> {
    WorkspaceTemplates::get(name)
        .map(|file| file.data.into_owned())
        .ok_or_else(|| ProjectError::MissingTemplate(name.to_string()))
}

/// Errors that can occur during project operations
#[derive(Debug, Error, Diagnostic)]
pub enum ProjectError {
    #[error("not a tdesk workspace (searched from {searched_from:?})")]
    #[diagnostic(code(tdesk::project::not_found), help("run 'tdesk init' to create one"))]
    NotFound { searched_from: PathBuf },

    #[error("tdesk workspace already exists at {0:?}")]
    #[diagnostic(code(tdesk::project::exists))]
    AlreadyExists(PathBuf),

    #[error("built-in template '{0}' is missing")]
    #[diagnostic(code(tdesk::project::template))]
    MissingTemplate(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(tdesk::project::io))]
    Io(#[source] std::io::Error),
}
