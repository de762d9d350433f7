//! CLI argument parsing for mksyscalls

use crate::config::{DEFAULT_LINUX_VERSION, DEFAULT_OUTPUT};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the generated tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rust source with one static table per architecture (default)
    Rust,
    /// JSON document for non-Rust consumers
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "mksyscalls")]
#[command(version)]
#[command(about = "Generate Linux syscall number-to-name tables from kernel sources", long_about = None)]
pub struct Cli {
    /// Output file
    #[arg(short = 'o', long = "out", value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub out: PathBuf,

    /// Linux version (git tag) to read the syscall tables from
    #[arg(
        short = 'l',
        long = "linux-version",
        value_name = "TAG",
        default_value = DEFAULT_LINUX_VERSION
    )]
    pub linux_version: String,

    /// Output format (rust or json)
    #[arg(long = "format", value_enum, default_value = "rust")]
    pub format: OutputFormat,

    /// Base URL of the raw kernel source tree (overrides the config file)
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Read sources from a local kernel checkout instead of downloading them
    #[arg(long = "source-dir", value_name = "DIR", conflicts_with = "base_url")]
    pub source_dir: Option<PathBuf>,

    /// TOML file with architecture rules (replaces the built-in rules)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long = "dump-config")]
    pub dump_config: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
