//! Render configuration: how element descriptors resolve their scope key

use anyhow::{Context, Result};
use construct::fragment::{EmitOptions, ScopePattern, ScopeStrategy};
use serde::Deserialize;

/// Pattern matching the host's style-scope marker attributes
pub const DEFAULT_SCOPE_PATTERN: &str = "^b-";

/// Scope-key settings for emission passes
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Scan emitted attributes for a scope marker when no key is given
    pub scope_discovery: bool,
    /// Regex a marker attribute name must match
    pub scope_pattern: String,
    /// Explicit scope key; wins over discovery
    pub scope_key: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scope_discovery: true,
            scope_pattern: DEFAULT_SCOPE_PATTERN.to_string(),
            scope_key: None,
        }
    }
}

/// Render settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileRender {
    pub scope_discovery: Option<bool>,
    pub scope_pattern: Option<String>,
    pub scope_key: Option<String>,
}

impl RenderConfig {
    /// Create from file config with defaults; `key_override` comes from the
    /// environment and beats the file
    pub fn from_file(file: Option<FileRender>, key_override: Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            scope_discovery: file.scope_discovery.unwrap_or(defaults.scope_discovery),
            scope_pattern: file.scope_pattern.unwrap_or(defaults.scope_pattern),
            scope_key: key_override
                .or(file.scope_key)
                .filter(|key| !key.trim().is_empty()),
        }
    }

    /// Emission options for these settings
    pub fn emit_options(&self) -> Result<EmitOptions> {
        if let Some(key) = &self.scope_key {
            return Ok(EmitOptions::with_scope_key(key.clone()));
        }
        if !self.scope_discovery {
            return Ok(EmitOptions {
                scope: ScopeStrategy::Disabled,
            });
        }

        let pattern = ScopePattern::regex(&self.scope_pattern)
            .with_context(|| format!("Invalid render.scope_pattern {:?}", self.scope_pattern))?;
        Ok(EmitOptions {
            scope: ScopeStrategy::Discover(pattern),
        })
    }
}
