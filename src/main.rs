//! pygrapher command-line entry point.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use pygrapher::cli::commands;
use pygrapher::cli::{Cli, Commands};
use pygrapher::config::{CONFIG_DIR, Settings};
use pygrapher::{ExitCode, GraphError, logging};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from_error(&e)
        }
    };
    code.into()
}

fn run(cli: Cli) -> Result<()> {
    // Init must work without a readable configuration
    let settings = if matches!(cli.command, Commands::Init { .. }) {
        Settings::default()
    } else {
        load_settings(cli.config.as_deref(), cli.info)?
    };
    logging::init_with_config(&settings.logging);

    match cli.command {
        Commands::Init { force } => {
            let dir = std::env::current_dir()?;
            commands::init::run_init(&dir, force).map(drop)
        }
        Commands::Config => commands::init::run_config(&settings),
        Commands::Convert {
            input,
            output,
            repo,
            pretty,
        } => {
            let stats = commands::convert::run(
                &settings,
                input.as_deref(),
                output.as_deref(),
                repo.as_deref(),
                pretty,
            )?;
            if cli.info {
                eprintln!(
                    "Converted {} symbols, {} refs ({} self, {} dropped, {} suppressed), {} docs",
                    stats.symbols,
                    stats.refs + stats.self_refs,
                    stats.self_refs,
                    stats.dropped_refs,
                    stats.suppressed_refs,
                    stats.docs
                );
            }
            Ok(())
        }
        Commands::Resolve {
            path,
            symbol,
            reqs,
            repo,
        } => commands::resolve::run(
            &settings,
            &path,
            symbol,
            reqs.as_deref(),
            repo.as_deref(),
        ),
    }
}

fn load_settings(config: Option<&Path>, info: bool) -> Result<Settings> {
    if let Some(path) = config {
        if !path.exists() {
            return Err(GraphError::Config(format!(
                "configuration file not found: {}",
                path.display()
            ))
            .into());
        }
        if info {
            eprintln!("Loading configuration from {}", path.display());
        }
        return Settings::load_from(path).map_err(|e| GraphError::Config(e.to_string()).into());
    }

    if let Err(warning) = Settings::check_init() {
        if info {
            eprintln!("{warning}");
            eprintln!(
                "Using default configuration (run 'pygrapher init' to create {CONFIG_DIR}/settings.toml)"
            );
        }
    } else if info {
        if let Some(path) = Settings::find_workspace_config() {
            eprintln!("Loading configuration from {}", path.display());
        }
    }

    Settings::load().map_err(|e| GraphError::Config(e.to_string()).into())
}
