//! Configuration for the preview binary
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/construct/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod preview;
mod render;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use logging::{FileLogging, LogRotation, LoggingConfig};
pub use preview::{FilePreview, OutputFormat, PageKind, PreviewConfig};
pub use render::{FileRender, RenderConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable selecting the demo page
pub const ENV_PAGE: &str = "CONSTRUCT_PAGE";
/// Environment variable selecting the output format
pub const ENV_FORMAT: &str = "CONSTRUCT_FORMAT";
/// Environment variable forcing an explicit scope key
pub const ENV_SCOPE_KEY: &str = "CONSTRUCT_SCOPE_KEY";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "CONSTRUCT_LOG_LEVEL";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Scope-key handling for emission passes
    pub render: RenderConfig,

    /// Demo page and output settings
    pub preview: PreviewConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Config file structure (all fields optional)
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub render: Option<FileRender>,
    pub preview: Option<FilePreview>,
    pub logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/construct/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("construct").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        if let Err(e) = std::fs::write(&path, Self::default().to_toml()) {
            tracing::debug!("Could not write default config to {}: {}", path.display(), e);
        }
    }

    /// Load file config if it exists
    ///
    /// A file that exists but does not parse is an error. Falling back to
    /// defaults would hide the broken file.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse {} (check quoting, booleans and section names, \
                     or run `construct-preview config --reset`)",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Self::from_sources(file, |name| std::env::var(name).ok())
    }

    /// Merge a parsed file with values looked up through `env`
    ///
    /// An env value that names no known variant is an error, same as a bad
    /// value in the file.
    pub fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let page = env(ENV_PAGE).map(|raw| parse_env(ENV_PAGE, &raw)).transpose()?;
        let format = env(ENV_FORMAT).map(|raw| parse_env(ENV_FORMAT, &raw)).transpose()?;

        Ok(Self {
            render: RenderConfig::from_file(file.render, env(ENV_SCOPE_KEY)),
            preview: PreviewConfig::from_file(file.preview, page, format),
            logging: LoggingConfig::from_file(file.logging, env(ENV_LOG_LEVEL)),
        })
    }
}

/// Parse an enum-valued env override, case-insensitively
fn parse_env<T: ValueEnum>(name: &str, raw: &str) -> Result<T> {
    T::from_str(raw.trim(), true).map_err(|_| {
        let accepted: Vec<String> = T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        anyhow!("{}={:?} is not one of: {}", name, raw, accepted.join(", "))
    })
}
