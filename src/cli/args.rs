//! Defines the command-line arguments for an embedded syntest runner.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "syntest",
    version,
    about = "Fixture-driven diagnostics tests for compiler front-ends."
)]
pub struct SyntestArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discover and run every fixture under a directory.
    Run {
        /// The directory containing fixture files.
        #[arg(default_value = "tests/fixtures")]
        path: PathBuf,
        /// Only run cases whose name contains this substring.
        #[arg(long)]
        filter: Option<String>,
        /// Prefix obtained diagnostics with recovered source line numbers.
        #[arg(long)]
        line_numbers: bool,
        /// Drop warnings from the obtained block.
        #[arg(long)]
        ignore_warnings: bool,
        /// Disable colored output.
        #[arg(long)]
        no_color: bool,
    },
    /// List every fixture file that would be registered.
    List {
        /// The directory containing fixture files.
        #[arg(default_value = "tests/fixtures")]
        path: PathBuf,
    },
}
