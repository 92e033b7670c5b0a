//! Command-line interface definitions for mdtrack

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the mdtrack application
#[derive(Parser)]
#[command(name = "mdtrack")]
#[command(version)]
#[command(about = "Markdown progress tracker", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for mdtrack
#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory for markdown files and summarize trackable items
    Scan {
        /// Root directory to scan (defaults to current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the trackable items of a single markdown file
    Items {
        /// Markdown file to inspect
        file: PathBuf,

        /// Print the header-nested tree instead of the flat list
        #[arg(short, long)]
        tree: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the exact source slice of one item (descendants included)
    Slice {
        /// Markdown file containing the item
        file: PathBuf,

        /// Stable item ID, as printed by the items subcommand
        id: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}
