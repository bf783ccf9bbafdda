//! CLI parse: clap types for netview. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Netview CLI - read-only interface views over device state tables
#[derive(Parser, Debug)]
#[command(name = "netview")]
#[command(about = "Show port-channel and neighbor views computed from device state tables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path, layered over global and local files
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Table store directory (overrides store.path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show an interface view
    Show {
        #[arg(value_enum)]
        view: ShowTarget,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Display interface aliases instead of raw names
        #[arg(long)]
        alias: bool,
    },
    /// Answer a raw query path with the serialized view
    Get {
        /// Query path, e.g. interface/portchannel
        path: String,
        /// Display interface aliases instead of raw names
        #[arg(long)]
        alias: bool,
    },
    /// Load a JSON dataset of rows into a database
    Load {
        /// Database: CONFIG_DB, APPL_DB or STATE_DB
        db: String,
        /// JSON file mapping raw store keys to field objects
        file: PathBuf,
    },
    /// Remove every row of a database
    Flush {
        /// Database: CONFIG_DB, APPL_DB or STATE_DB
        db: String,
    },
    /// Print the effective configuration
    Config,
    /// List registered view paths
    Views,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowTarget {
    /// interface/portchannel
    Portchannel,
    /// interface/neighbor/expected
    NeighborExpected,
}

impl ShowTarget {
    pub fn path(&self) -> &'static [&'static str] {
        match self {
            ShowTarget::Portchannel => &["interface", "portchannel"],
            ShowTarget::NeighborExpected => &["interface", "neighbor", "expected"],
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
