//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Morphex using clap.

pub mod commands;
pub mod prompt;

use clap::{Parser, Subcommand};

/// Morphex - morph shape exporter
#[derive(Parser, Debug)]
#[command(name = "morphex")]
#[command(version, about, long_about = None)]
#[command(author = "Morphex Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "morphex.toml", env = "MORPHEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MORPHEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export morph shapes to SVG documents or Canvas pages
    Export(commands::export::ExportArgs),

    /// List the records of a document
    List(commands::list::ListArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
