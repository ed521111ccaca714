// construct-preview - record render passes of the demo pages
//
// Mounts a demo component against an in-memory host, prints the instruction
// stream of every pass, and optionally dispatches clicks to show re-renders.
//
// Architecture:
// - cli (clap): subcommands and config handlers
// - config: env > ~/.config/construct/config.toml > defaults
// - logging (tracing): stderr or in-memory capture, optional JSON file
// - demo: the counter and profile pages
// - preview: render loop driven by the lifecycle's notifications

mod cli;
mod config;
mod demo;
mod logging;
mod preview;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, RenderArgs};
use config::Config;
use logging::LogBuffer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = match cli.command {
        Some(Commands::Config { show, path, reset }) => {
            return cli::handle_config(show, path, reset);
        }
        Some(Commands::Render(args)) => args,
        None => RenderArgs::default(),
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env()?;

    // With --trace, logs are held back and printed after the passes
    let capture = args.trace.then(LogBuffer::new);
    let _file_guard = logging::init(&config.logging, capture.clone())?;

    tracing::debug!("construct-preview v{}", config::VERSION);
    let report = preview::run(&config, &args).await?;
    preview::print(&report, args.format.unwrap_or(config.preview.format))?;

    if let Some(buffer) = capture {
        println!();
        println!("── captured logs ({}) ──", buffer.len());
        for entry in buffer.get_all() {
            println!("{}", entry);
        }
    }

    Ok(())
}
