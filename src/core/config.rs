//! Configuration management with layered hierarchy

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::Project;

/// Overrides the location of the global config file
pub const GLOBAL_CONFIG_ENV: &str = "TDESK_GLOBAL_CONFIG";

/// Valid configuration keys
pub const VALID_KEYS: &[(&str, &str)] = &[
    ("log_level", "Log filter for stderr diagnostics (e.g. warn, tdesk=debug)"),
    ("color", "Terminal colors: auto, always, never"),
    (
        "default_format",
        "Default output format for structured output (auto, yaml, json)",
    ),
];

/// tdesk configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter directive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Terminal color choice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl Config {
    /// Load configuration, discovering the project from `start` when given
    ///
    /// Layers that could not be read are returned alongside the merged config
    /// so the caller can report them once logging is up.
    pub fn load_from(start: Option<&Path>) -> (Self, Vec<ConfigError>) {
        let project = match start {
            Some(dir) => Project::discover_from(dir),
            None => Project::discover(),
        };
        let project_path = project.ok().map(|p| p.config_path());

        let (mut config, skipped) = Self::load_layers(
            Self::global_config_path().as_deref(),
            project_path.as_deref(),
        );
        config.apply_env(|name| std::env::var(name).ok());
        (config, skipped)
    }

    /// Merge the file layers in priority order (global, then project)
    ///
    /// Missing files are ignored. Unreadable or malformed ones are skipped and
    /// returned.
    pub fn load_layers(
        global: Option<&Path>,
        project: Option<&Path>,
    ) -> (Self, Vec<ConfigError>) {
        let mut config = Config::default();
        let mut skipped = Vec::new();

        for path in [global, project].into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::read_file(path) {
                Ok(layer) => config.merge(layer),
                Err(e) => skipped.push(e),
            }
        }

        (config, skipped)
    }

    /// Parse a single config file
    pub fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        // A freshly initialized config is nothing but comments
        if !has_settings(&contents) {
            return Ok(Config::default());
        }
        serde_yml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(level) = var("TDESK_LOG_LEVEL") {
            self.log_level = Some(level);
        }
        if let Some(color) = var("TDESK_COLOR") {
            self.color = Some(color);
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(GLOBAL_CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("", "", "tdesk")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Look up a value by key name
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "log_level" => self.log_level.as_deref(),
            "color" => self.color.as_deref(),
            "default_format" => self.default_format.as_deref(),
            _ => None,
        }
    }

    /// Resolved color choice; unknown values fall back to auto
    pub fn color_choice(&self) -> ColorChoice {
        match self.color.as_deref() {
            Some("always") => ColorChoice::Always,
            Some("never") => ColorChoice::Never,
            Some("auto") | None => ColorChoice::Auto,
            Some(other) => {
                tracing::warn!(value = other, "unknown color setting, using auto");
                ColorChoice::Auto
            }
        }
    }
}

/// True if any line of a config file is neither blank nor a comment
pub(crate) fn has_settings(contents: &str) -> bool {
    contents.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    })
}

/// Check that `key` is known and `value` is acceptable for it
pub fn validate_entry(key: &str, value: &str) -> Result<(), ConfigError> {
    if !VALID_KEYS.iter().any(|(k, _)| *k == key) {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }

    let ok = match key {
        "log_level" => tracing_subscriber::EnvFilter::try_new(value).is_ok(),
        "color" => matches!(value, "auto" | "always" | "never"),
        "default_format" => matches!(value, "auto" | "yaml" | "json"),
        _ => true,
    };

    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key '{0}'")]
    #[diagnostic(code(tdesk::config::key), help("run 'tdesk config keys' to list valid keys"))]
    UnknownKey(String),

    #[error("invalid value '{value}' for '{key}'")]
    #[diagnostic(code(tdesk::config::value))]
    InvalidValue { key: String, value: String },

    #[error("could not read {}", .path.display())]
    #[diagnostic(code(tdesk::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {}: {}", .path.display(), .message)]
    #[diagnostic(code(tdesk::config::parse))]
    Parse { path: PathBuf, message: String },
}
