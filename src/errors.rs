//! Harness-level error handling.
//!
//! An expectation mismatch is not an error: it is rendered through the
//! report sink and surfaced as `Ok(false)` from [`crate::case::SyntaxCase::run`],
//! so a failing case never aborts the rest of the suite. The variants here
//! are the fatal conditions: unreadable fixtures, directory traversal
//! failures, and hard failures raised by the analyzer itself.

use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// The single error type for the harness.
#[derive(Debug, Error, Diagnostic)]
pub enum SyntestError {
    /// A fixture file or directory could not be opened or read.
    #[error("cannot open test fixture {path:?}: {source}")]
    #[diagnostic(code(syntest::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Directory traversal failed while discovering fixtures.
    #[error("failed to walk fixture directory: {0}")]
    #[diagnostic(code(syntest::walk))]
    Walk(#[from] walkdir::Error),

    /// The analyzer reported a hard failure. Propagated, never caught.
    #[error("analysis failed: {message}")]
    #[diagnostic(code(syntest::analysis))]
    Analysis { message: String },
}

impl SyntestError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis {
            message: message.into(),
        }
    }
}
