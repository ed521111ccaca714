// CLI module - command-line argument parsing and config handlers
//
// Subcommands:
// - render: mount a demo page and print every recorded pass
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults

use crate::config::{Config, OutputFormat, PageKind, VERSION};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;

/// Render fragments against an in-memory host and print the instruction stream
#[derive(Parser)]
#[command(name = "construct-preview")]
#[command(version = VERSION)]
#[command(about = "Preview render passes of the demo pages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mount a demo page and print its render passes (default)
    Render(RenderArgs),

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Page to mount (overrides config)
    #[arg(long, value_enum)]
    pub page: Option<PageKind>,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of clicks to dispatch after mounting
    #[arg(long, default_value_t = 0)]
    pub clicks: u32,

    /// Capture lifecycle logs and print them after the passes
    #[arg(long)]
    pub trace: bool,
}

/// Handle config subcommands
pub fn handle_config(show: bool, path: bool, reset: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset()
    } else {
        println!("Usage: construct-preview config [--show|--path|--reset]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
        println!("  --reset   Reset config file to defaults");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    print!("{}", config.to_toml());
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::default()
        .save()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
