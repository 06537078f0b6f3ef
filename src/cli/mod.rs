//! The embedding entry point for compiler projects.
//!
//! The harness ships no binary of its own; the compiler under test is an
//! external collaborator. A project embeds the runner by calling [`run`]
//! with its own [`Analyzer`] from a `harness = false` test target:
//!
//! ```rust,no_run
//! use std::process::ExitCode;
//! # struct MyAnalyzer;
//! # impl syntest::analysis::Analyzer for MyAnalyzer {
//! #     fn analyze(&self, _: &str, _: &syntest::analysis::AnalysisSettings)
//! #         -> Result<Vec<syntest::analysis::Diagnostic>, syntest::SyntestError> { Ok(vec![]) }
//! # }
//!
//! fn main() -> ExitCode {
//!     syntest::cli::run(&MyAnalyzer)
//! }
//! ```

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use termcolor::ColorChoice;

use crate::analysis::Analyzer;
use crate::case::RunOptions;
use crate::cli::args::{Command, SyntestArgs};
use crate::discovery;
use crate::errors::SyntestError;
use crate::report::{ReportSink, TermSink, Tone};

pub mod args;

/// Parses arguments from the environment and runs the suite against the
/// given analyzer. Exits nonzero when any case fails or a fatal error
/// occurs.
pub fn run(analyzer: &dyn Analyzer) -> ExitCode {
    let args = SyntestArgs::parse();
    match execute(args, analyzer) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            ExitCode::FAILURE
        }
    }
}

fn execute(args: SyntestArgs, analyzer: &dyn Analyzer) -> Result<bool, SyntestError> {
    match args.command {
        Command::Run {
            path,
            filter,
            line_numbers,
            ignore_warnings,
            no_color,
        } => {
            let choice = if no_color || !atty::is(atty::Stream::Stdout) {
                ColorChoice::Never
            } else {
                ColorChoice::Auto
            };
            let mut sink = TermSink::stdout(choice);

            let tree = discovery::build_tree(&path, Path::new(""))?;
            sink.write(
                &format!("Discovered {} test cases under {}\n", tree.leaf_count(), path.display()),
                Tone::Plain,
            );

            let options = RunOptions {
                line_numbers,
                ignore_warnings,
                ..RunOptions::default()
            };
            let summary =
                discovery::run_tree(&tree, analyzer, &mut sink, &options, filter.as_deref())?;
            Ok(summary.all_passed())
        }
        Command::List { path } => {
            for file in discovery::discover_fixture_files(&path)? {
                println!("{}", file.display());
            }
            Ok(true)
        }
    }
}
