use clap::Parser;
use std::path::PathBuf;

use super::commands::Commands;
use super::output::OutputFormat;

/// SafeHarbor credential and access-check tooling.
#[derive(Parser)]
#[command(name = "safeharbor", version, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// YAML config. Without it, config/safeharbor.yaml and then the user
    /// config dir are tried before falling back to defaults.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Tracing level used when RUST_LOG is unset
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Shorthand for --log-level debug
    #[arg(short, long)]
    pub debug: bool,

    /// Rendering of command results on stdout
    #[arg(short, long, value_name = "FORMAT", default_value = "human")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}
