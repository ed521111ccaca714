//! `[preview]` section: which demo page to mount and how to print passes

use serde::Deserialize;

/// Demo page mounted by `render`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// Click counter with an async initial load
    #[default]
    Counter,
    /// Profile card composed from layout slots
    Profile,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Profile => "profile",
        }
    }
}

/// How recorded render passes are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per instruction
    #[default]
    Text,
    /// The whole report as one JSON document
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Preview settings
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    pub page: PageKind,
    pub format: OutputFormat,
    /// Simulated latency of the counter page's initial load
    pub init_delay_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            page: PageKind::Counter,
            format: OutputFormat::Text,
            init_delay_ms: 50,
        }
    }
}

/// `[preview]` as written in the file
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FilePreview {
    pub page: Option<PageKind>,
    pub format: Option<OutputFormat>,
    pub init_delay_ms: Option<u64>,
}

impl PreviewConfig {
    /// Create from file config with defaults, env values first
    pub fn from_file(
        file: Option<FilePreview>,
        page_override: Option<PageKind>,
        format_override: Option<OutputFormat>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            page: page_override.or(file.page).unwrap_or(defaults.page),
            format: format_override.or(file.format).unwrap_or(defaults.format),
            init_delay_ms: file.init_delay_ms.unwrap_or(defaults.init_delay_ms),
        }
    }
}
