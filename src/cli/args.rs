//! CLI argument parsing using clap.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

const QUICK_START: &str = "\
Quick Start:
  $ pygrapher init                                  # Write .pygrapher/settings.toml
  $ pygrapher convert graph.json --repo github.com/acme/app > out.json
  $ pygrapher resolve /src/pkg/mod.py               # Show how a path resolves
  $ pygrapher resolve --symbol path/join            # Resolve a namespace path";

/// Python dependency graph converter
#[derive(Parser, Debug)]
#[command(
    name = "pygrapher",
    version = env!("CARGO_PKG_VERSION"),
    about = "Convert Python analyzer output into cross-repository graph records",
    next_line_help = true,
    styles = clap_cargo_style(),
    after_help = QUICK_START
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show detailed loading information
    #[arg(long, global = true)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up .pygrapher directory with default configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Display active settings
    Config,

    /// Convert a raw analyzer payload into graph JSON
    Convert {
        /// Analyzer output file; stdin when omitted or `-`
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Write output here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Repository under analysis (overrides config)
        #[arg(long, value_name = "URI")]
        repo: Option<String>,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Show how a sandbox path or namespace path resolves
    Resolve {
        /// Absolute sandbox path, or a namespace path with --symbol
        #[arg(value_name = "PATH")]
        path: String,

        /// Treat PATH as a symbol namespace path
        #[arg(long)]
        symbol: bool,

        /// Read requirements from an analyzer payload or a JSON requirement list
        #[arg(long, value_name = "FILE")]
        reqs: Option<PathBuf>,

        /// Repository under analysis (overrides config)
        #[arg(long, value_name = "URI")]
        repo: Option<String>,
    },
}
