//! `[logging]` section: level and the optional JSON log file

use serde::Deserialize;
use std::path::PathBuf;

/// How often the JSON log file starts a new segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// One file for the lifetime of the log directory
    Never,
}

impl LogRotation {
    /// Spelling used in the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Effective logging settings
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` level for the construct crates; `RUST_LOG` still wins
    pub level: String,
    /// Write JSON lines next to the stderr/capture output
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem, dated by the appender
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::default(),
            file_prefix: "construct".to_string(),
        }
    }
}

/// `[logging]` as written in the file; absent keys keep their defaults
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<PathBuf>,
    pub file_rotation: Option<LogRotation>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Overlay the file section, then the level override from the environment
    pub fn from_file(file: Option<FileLogging>, level_override: Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let mut config = Self::default();

        if let Some(level) = level_override.or(file.level) {
            config.level = level;
        }
        if let Some(enabled) = file.file_enabled {
            config.file_enabled = enabled;
        }
        if let Some(dir) = file.file_dir {
            config.file_dir = dir;
        }
        if let Some(rotation) = file.file_rotation {
            config.file_rotation = rotation;
        }
        if let Some(prefix) = file.file_prefix {
            config.file_prefix = prefix;
        }
        config
    }
}
