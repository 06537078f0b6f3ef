//! Shared scaffolding for the integration suites: a scripted analyzer that
//! stands in for the compiler under test.

// Each integration target compiles this module separately and uses a subset.
#![allow(dead_code)]

use std::path::PathBuf;

use syntest::analysis::{AnalysisSettings, Analyzer, Diagnostic};
use syntest::SyntestError;

/// The synthetic prefix the fake analyzer pretends to prepend before
/// computing offsets, mirroring a front-end that injects a version pragma.
pub const PREAMBLE: &str = "pragma marker >=0.0;\n";

/// A deterministic stand-in for the front-end: every source line starting
/// with `bad` yields a `ParserError`, every line starting with `warn`
/// yields a `Warning`, both located at the line start.
pub struct MarkerAnalyzer;

impl Analyzer for MarkerAnalyzer {
    fn analyze(
        &self,
        source: &str,
        _settings: &AnalysisSettings,
    ) -> Result<Vec<Diagnostic>, SyntestError> {
        let mut diagnostics = Vec::new();
        let mut offset = 0;
        for line in source.split_inclusive('\n') {
            let trimmed = line.trim_start();
            if trimmed.starts_with("bad") {
                diagnostics.push(Diagnostic::new(
                    "ParserError",
                    Some("unexpected token"),
                    PREAMBLE.len() + offset,
                ));
            } else if trimmed.starts_with("warn") {
                diagnostics.push(Diagnostic::new(
                    "Warning",
                    Some("statement has no effect"),
                    PREAMBLE.len() + offset,
                ));
            }
            offset += line.len();
        }
        Ok(diagnostics)
    }

    fn preamble_len(&self) -> usize {
        PREAMBLE.len()
    }
}

/// Path to the committed fixture tree.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}
