//! Command-line interface definition for mealfinder.
//!
//! This module defines the CLI structure using clap derive macros,
//! including all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::LogLevel;

/// mealfinder - Meal ideas from the ingredients you already have
///
/// Serves a small HTTP API over a public recipe database, or queries the
/// database directly from the command line.
#[derive(Debug, Parser)]
#[command(name = "mealfinder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "MEALFINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the log level requested by `-v`/`-q`, if any.
    pub fn log_level_override(&self) -> Option<LogLevel> {
        if self.quiet {
            return Some(LogLevel::Error);
        }

        match self.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Print a random meal
    Random,

    /// Print the full record of one meal
    Lookup(LookupArgs),

    /// Find meals by ingredients and dietary tags
    Search(SearchArgs),

    /// Configuration file operations
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Arguments for the `serve` subcommand.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Bind address (overrides server.bind)
    #[arg(long)]
    pub bind: Option<String>,

    /// Listen port (overrides server.port)
    #[arg(long)]
    pub port: Option<u16>,
}

/// Arguments for the `lookup` subcommand.
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Meal identifier (e.g. 52772)
    pub id: String,
}

/// Arguments for the `search` subcommand.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Comma-separated ingredients (e.g. "chicken,rice")
    #[arg(short, long)]
    pub ingredients: String,

    /// Dietary tag to keep (can be repeated)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Validate the configuration file
    Validate,

    /// Show the effective configuration
    Show,
}
