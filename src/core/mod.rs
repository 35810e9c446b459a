//! Core module - export, workspace, configuration and logging

pub mod config;
pub mod export;
pub mod logging;
pub mod project;

pub use config::{ColorChoice, Config, ConfigError};
pub use export::{ExportError, FailureKind};
pub use project::{Project, ProjectError};
