//! The seam to the compiler under test.
//!
//! The harness never looks inside the front-end: it hands source text to an
//! injected [`Analyzer`] and gets back a list of [`Diagnostic`]s. Tests
//! script the analyzer with a closure; a real compiler project implements
//! the trait over its own analysis entry point.

use crate::errors::SyntestError;

/// A front-end diagnostic as seen by the harness: a type label, an optional
/// free-text message, and a location offset. Everything else the compiler
/// attaches to its diagnostics is opaque here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub type_name: String,
    pub message: Option<String>,
    /// Byte offset into the source *as seen by the analyzer*, which
    /// includes the analyzer's synthetic preamble.
    pub offset: usize,
}

impl Diagnostic {
    pub fn new(
        type_name: impl Into<String>,
        message: Option<&str>,
        offset: usize,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.map(str::to_owned),
            offset,
        }
    }

    /// The message with literal newlines escaped to the two-character
    /// sequence `\n`, or the literal `NONE` when the diagnostic carries no
    /// message. Expectations are compared against this form.
    pub fn escaped_message(&self) -> String {
        match &self.message {
            Some(message) => message.replace('\n', "\\n"),
            None => "NONE".to_string(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.type_name == "Warning"
    }
}

/// The three options forwarded verbatim to the analyzer. Their exact
/// semantics are owned by the compiler under test; every flag defaults on.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisSettings {
    pub report_warnings: bool,
    pub inject_preamble: bool,
    pub allow_multiple: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            report_warnings: true,
            inject_preamble: true,
            allow_multiple: true,
        }
    }
}

/// The analysis capability a compiler project injects into the harness.
pub trait Analyzer {
    /// Runs the front-end on `source` and returns its diagnostics in the
    /// order they were produced. A hard failure here aborts the case.
    fn analyze(
        &self,
        source: &str,
        settings: &AnalysisSettings,
    ) -> Result<Vec<Diagnostic>, SyntestError>;

    /// Byte length of the synthetic prefix the analyzer prepends to source
    /// before computing offsets (a version pragma, an implicit module
    /// header, ...). Zero when offsets are relative to the fixture source.
    fn preamble_len(&self) -> usize {
        0
    }
}

impl<F> Analyzer for F
where
    F: Fn(&str, &AnalysisSettings) -> Result<Vec<Diagnostic>, SyntestError>,
{
    fn analyze(
        &self,
        source: &str,
        settings: &AnalysisSettings,
    ) -> Result<Vec<Diagnostic>, SyntestError> {
        self(source, settings)
    }
}
