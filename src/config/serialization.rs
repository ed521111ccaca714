//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to TOML format
    ///
    /// Used by `ensure_config_exists`, `config --reset` and `save`.
    pub fn to_toml(&self) -> String {
        let scope_key = match &self.render.scope_key {
            Some(key) => format!("scope_key = {:?}", key),
            None => "# scope_key = \"b-3xk9q2\"".to_string(),
        };

        format!(
            r#"# construct-preview configuration
# Precedence: environment variables > this file > built-in defaults

# ─────────────────────────────────────────────────────────────────────────────
# Render
# ─────────────────────────────────────────────────────────────────────────────

[render]
# Scan emitted attributes for a style-scope marker when no key is set
scope_discovery = {scope_discovery}
# Regex a marker attribute name must match
scope_pattern = {scope_pattern:?}
# Explicit scope key (CONSTRUCT_SCOPE_KEY); wins over discovery
{scope_key}

# ─────────────────────────────────────────────────────────────────────────────
# Preview
# ─────────────────────────────────────────────────────────────────────────────

[preview]
# Demo page: "counter" or "profile" (CONSTRUCT_PAGE)
page = "{page}"
# Output: "text" or "json" (CONSTRUCT_FORMAT)
format = "{format}"
# Simulated latency of the counter page's initial load
init_delay_ms = {init_delay_ms}

# ─────────────────────────────────────────────────────────────────────────────
# Logging
# ─────────────────────────────────────────────────────────────────────────────

[logging]
# trace, debug, info, warn, error (CONSTRUCT_LOG_LEVEL)
level = "{level}"
# JSON lines written alongside stderr output
file_enabled = {file_enabled}
file_dir = {file_dir:?}
# hourly, daily, never
file_rotation = "{file_rotation}"
file_prefix = "{file_prefix}"
"#,
            scope_discovery = self.render.scope_discovery,
            scope_pattern = self.render.scope_pattern,
            scope_key = scope_key,
            page = self.preview.page.as_str(),
            format = self.preview.format.as_str(),
            init_delay_ms = self.preview.init_delay_ms,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display().to_string(),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = self.logging.file_prefix,
        )
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }
}
