//! Configuration tests
//!
//! `to_toml` and the File* structs must agree: whatever we write has to
//! parse back into the same config.

use super::*;
use construct::fragment::ScopeStrategy;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> Config {
    let file: FileConfig = toml::from_str(toml_str).expect("config should parse");
    Config::from_sources(file, no_env).expect("no env overrides")
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
    assert_eq!(parse(&toml_str), config);
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.render.scope_discovery = false;
    config.render.scope_pattern = r"^scope-\d+$".to_string();
    config.render.scope_key = Some("b-abc123".to_string());
    config.preview.page = PageKind::Profile;
    config.preview.format = OutputFormat::Json;
    config.preview.init_delay_ms = 0;
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    assert_eq!(parse(&config.to_toml()), config);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    assert_eq!(parse(""), Config::default());
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
[preview]
page = "counter"
format = "text"

[render]
scope_key = "b-file"
"#,
    )
    .unwrap();

    let env: HashMap<&str, &str> = [
        (ENV_PAGE, "profile"),
        (ENV_FORMAT, "JSON"),
        (ENV_SCOPE_KEY, "b-env"),
        (ENV_LOG_LEVEL, "trace"),
    ]
    .into_iter()
    .collect();

    let config =
        Config::from_sources(file, |name| env.get(name).map(|v| v.to_string())).unwrap();
    assert_eq!(config.preview.page, PageKind::Profile);
    assert_eq!(config.preview.format, OutputFormat::Json);
    assert_eq!(config.render.scope_key.as_deref(), Some("b-env"));
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_blank_scope_key_is_ignored() {
    let config = parse("[render]\nscope_key = \"   \"\n");
    assert_eq!(config.render.scope_key, None);
}

#[test]
fn test_unknown_enum_values_are_rejected() {
    for broken in [
        "[logging]\nfile_rotation = \"weekly\"\n",
        "[preview]\npage = \"profil\"\n",
        "[preview]\nformat = \"yaml\"\n",
    ] {
        let parsed: Result<FileConfig, _> = toml::from_str(broken);
        assert!(parsed.is_err(), "should reject:\n{}", broken);
    }
}

#[test]
fn test_unknown_keys_are_rejected() {
    let parsed: Result<FileConfig, _> = toml::from_str("[preview]\npages = \"profile\"\n");
    assert!(parsed.is_err());
}

#[test]
fn test_bad_env_value_is_an_error() {
    let err = Config::from_sources(FileConfig::default(), |name| {
        (name == ENV_FORMAT).then(|| "yaml".to_string())
    })
    .unwrap_err();

    let message = err.to_string();
    assert!(message.contains(ENV_FORMAT), "{}", message);
    assert!(message.contains("text, json"), "{}", message);
}

// ─────────────────────────────────────────────────────────────────────────────
// Emit options
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_emit_options_follow_render_settings() {
    let discover = RenderConfig::default().emit_options().unwrap();
    assert!(matches!(discover.scope, ScopeStrategy::Discover(_)));

    let disabled = RenderConfig {
        scope_discovery: false,
        ..RenderConfig::default()
    };
    assert!(matches!(
        disabled.emit_options().unwrap().scope,
        ScopeStrategy::Disabled
    ));

    let explicit = RenderConfig {
        scope_discovery: false,
        scope_key: Some("b-fixed".to_string()),
        ..RenderConfig::default()
    };
    assert!(matches!(
        explicit.emit_options().unwrap().scope,
        ScopeStrategy::Explicit(ref key) if key == "b-fixed"
    ));
}

#[test]
fn test_invalid_scope_pattern_is_an_error() {
    let config = RenderConfig {
        scope_pattern: "(unclosed".to_string(),
        ..RenderConfig::default()
    };
    let err = config.emit_options().unwrap_err();
    assert!(err.to_string().contains("scope_pattern"));
}
