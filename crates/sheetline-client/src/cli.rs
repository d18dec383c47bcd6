//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// sheetline - Turn a published spreadsheet into a timeline configuration
#[derive(Debug, Parser)]
#[command(name = "sheetline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "SHEETLINE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns whether JSON output should be pretty-printed.
    ///
    /// `--compact` always wins over the `[output] pretty` setting.
    pub fn pretty(&self, configured: bool) -> bool {
        configured && !self.compact
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a published spreadsheet and print its timeline configuration
    Build {
        /// Spreadsheet URL or bare key
        url: String,
    },

    /// Build a timeline configuration from a saved list feed
    Convert {
        /// Feed JSON file, or `-` for stdin
        input: String,
    },

    /// Show the spreadsheet key, worksheet and feed URL for a URL
    Locate {
        /// Spreadsheet URL or bare key
        url: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}
