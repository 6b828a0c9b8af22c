//! ChemViz CLI Library
//!
//! Command-line client for the equipment dataset pipeline.
//!
//! # Overview
//!
//! The CLI works directly against a local data directory (the same layout
//! the server uses), so it needs no running server:
//!
//! - **Upload**: Parse a CSV and store its summary (`chemviz upload`)
//! - **Latest**: Show the most recent summary (`chemviz latest`)
//! - **History**: List retained uploads, newest first (`chemviz history`)
//! - **Show**: Look up one dataset by id (`chemviz show`)
//! - **Report**: Write the PDF report to disk (`chemviz report`)

pub mod commands;
pub mod error;
pub mod output;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default data directory shared with the server
pub const DEFAULT_DATA_DIR: &str = "./data";

/// ChemViz - Chemical Equipment Dataset Summaries
#[derive(Parser, Debug)]
#[command(name = "chemviz")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding the database and uploaded files
    #[arg(long, env = "CHEMVIZ_DATA_DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    pub data_dir: PathBuf,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload an equipment CSV and print its summary
    Upload {
        /// CSV file with Equipment Name, Type, Flowrate, Pressure, Temperature columns
        file: PathBuf,

        /// Display name (defaults to a timestamped name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show the most recent upload
    Latest,

    /// List retained uploads, newest first
    History {
        /// Number of records to show (1-5)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one dataset by id
    Show {
        /// Dataset id
        id: String,
    },

    /// Write the PDF report for a dataset
    Report {
        /// Dataset id (defaults to the latest upload)
        #[arg(long)]
        id: Option<String>,

        /// Output path (defaults to equipment_report_<id>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from(["chemviz", "upload", "plant.csv", "--name", "Run A"]).unwrap();

        match cli.command {
            Commands::Upload { file, name } => {
                assert_eq!(file, PathBuf::from("plant.csv"));
                assert_eq!(name.as_deref(), Some("Run A"));
            },
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!cli.json);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["chemviz", "history", "--limit", "3", "--json", "--data-dir", "/tmp/cv"])
                .unwrap();

        assert!(cli.json);
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/cv"));
        assert!(matches!(cli.command, Commands::History { limit: Some(3) }));
    }

    #[test]
    fn test_report_defaults() {
        let cli = Cli::try_parse_from(["chemviz", "report"]).unwrap();
        assert!(matches!(cli.command, Commands::Report { id: None, output: None }));
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["chemviz"]).is_err());
        assert!(Cli::try_parse_from(["chemviz", "show"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
