//! A single fixture-driven syntax test case.
//!
//! A case owns one parsed source string and one ordered expectation list.
//! Lifecycle: construct from a fixture file, run once against an injected
//! analyzer, report, discard.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::analysis::{AnalysisSettings, Analyzer, Diagnostic};
use crate::errors::SyntestError;
use crate::fixture::{self, Expectation, Fixture};
use crate::report::{self, BufferSink, ReportSink, Tone};

/// How a case is analyzed and how its mismatch report is rendered.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub settings: AnalysisSettings,
    /// Prefix obtained diagnostics with recovered source line numbers.
    pub line_numbers: bool,
    /// Drop warnings from the obtained block.
    pub ignore_warnings: bool,
    /// Prepended to every rendered line.
    pub line_prefix: String,
    /// Extra indentation of block contents relative to their headers.
    pub indent: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            settings: AnalysisSettings::default(),
            line_numbers: false,
            ignore_warnings: false,
            line_prefix: String::new(),
            indent: 2,
        }
    }
}

/// One declarative diagnostics test.
#[derive(Debug, Clone)]
pub struct SyntaxCase {
    name: String,
    source: String,
    expectations: Vec<Expectation>,
}

impl SyntaxCase {
    pub fn new(name: impl Into<String>, fixture: Fixture) -> Self {
        Self {
            name: name.into(),
            source: fixture.source,
            expectations: fixture.expectations,
        }
    }

    /// Reads and parses a fixture file. An unreadable file is fatal.
    pub fn from_file(path: &Path) -> Result<Self, SyntestError> {
        let file = File::open(path).map_err(|e| SyntestError::io(path, e))?;
        let fixture = fixture::parse(BufReader::new(file))
            .map_err(|e| SyntestError::io(path, e))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, fixture))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    /// Analyzes the source and compares the produced diagnostics against
    /// the expectations. On mismatch, renders the expected and obtained
    /// blocks (plus a line diff) into the sink and returns `Ok(false)`.
    pub fn run(
        &self,
        analyzer: &dyn Analyzer,
        sink: &mut dyn ReportSink,
        options: &RunOptions,
    ) -> Result<bool, SyntestError> {
        let diagnostics = analyzer.analyze(&self.source, &options.settings)?;
        if self.matches(&diagnostics) {
            return Ok(true);
        }

        let prefix = &options.line_prefix;
        let inner = format!("{prefix}{}", " ".repeat(options.indent));
        let preamble_len = analyzer.preamble_len();

        sink.write(&format!("{prefix}Expected result:\n"), Tone::Plain);
        report::render_expected(sink, &self.expectations, &inner);
        sink.write(&format!("{prefix}Obtained result:\n"), Tone::Plain);
        report::render_diagnostics(
            sink,
            &diagnostics,
            &self.source,
            preamble_len,
            &inner,
            options.ignore_warnings,
            options.line_numbers,
        );

        // Plain renderings of both blocks, diffed line by line.
        let mut expected = BufferSink::new();
        report::render_expected(&mut expected, &self.expectations, "");
        let mut obtained = BufferSink::new();
        report::render_diagnostics(
            &mut obtained,
            &diagnostics,
            &self.source,
            preamble_len,
            "",
            options.ignore_warnings,
            false,
        );
        sink.write(&format!("{prefix}Diff:\n"), Tone::Plain);
        report::render_diff(sink, &expected.as_text(), &obtained.as_text(), &inner);

        Ok(false)
    }

    /// Positional comparison of diagnostics against expectations. Length
    /// mismatch fails immediately; otherwise each diagnostic's type must
    /// equal the expectation type exactly and its escaped message must
    /// equal the expectation message. Order must match exactly.
    pub fn matches(&self, diagnostics: &[Diagnostic]) -> bool {
        if diagnostics.len() != self.expectations.len() {
            return false;
        }
        diagnostics
            .iter()
            .zip(&self.expectations)
            .all(|(diagnostic, expectation)| {
                diagnostic.type_name == expectation.type_name
                    && diagnostic.escaped_message() == expectation.message
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn case(text: &str) -> SyntaxCase {
        SyntaxCase::new("case", fixture::parse(Cursor::new(text)).unwrap())
    }

    fn scripted(
        diagnostics: Vec<Diagnostic>,
    ) -> impl Fn(&str, &AnalysisSettings) -> Result<Vec<Diagnostic>, SyntestError> {
        move |_, _| Ok(diagnostics.clone())
    }

    #[test]
    fn zero_expectations_match_zero_diagnostics() {
        let case = case("contract C {}\n// ----\n");
        assert!(case.matches(&[]));
        assert!(!case.matches(&[Diagnostic::new("Warning", Some("w"), 0)]));
    }

    #[test]
    fn equal_lists_match_positionally() {
        let case = case("x\n// ----\n// Warning: a\n// TypeError: b\n");
        let diagnostics = vec![
            Diagnostic::new("Warning", Some("a"), 0),
            Diagnostic::new("TypeError", Some("b"), 0),
        ];
        assert!(case.matches(&diagnostics));
    }

    #[test]
    fn permuted_lists_do_not_match() {
        let case = case("x\n// ----\n// Warning: a\n// TypeError: b\n");
        let permuted = vec![
            Diagnostic::new("TypeError", Some("b"), 0),
            Diagnostic::new("Warning", Some("a"), 0),
        ];
        assert!(!case.matches(&permuted));
    }

    #[test]
    fn length_mismatch_fails() {
        let case = case("x\n// ----\n// Warning: a\n");
        assert!(!case.matches(&[]));
    }

    #[test]
    fn type_comparison_is_case_sensitive() {
        let case = case("x\n// ----\n// Warning: a\n");
        assert!(!case.matches(&[Diagnostic::new("warning", Some("a"), 0)]));
    }

    #[test]
    fn missing_message_matches_the_literal_none() {
        let case = case("x\n// ----\n// DeclarationError: NONE\n");
        assert!(case.matches(&[Diagnostic::new("DeclarationError", None, 0)]));
    }

    #[test]
    fn embedded_newlines_match_their_escaped_form() {
        let case = case("x\n// ----\n// TypeError: first\\nsecond\n");
        let diagnostics = vec![Diagnostic::new("TypeError", Some("first\nsecond"), 0)];
        assert!(case.matches(&diagnostics));
    }

    #[test]
    fn matching_run_renders_nothing() {
        let case = case("x\n// ----\n// Warning: a\n");
        let analyzer = scripted(vec![Diagnostic::new("Warning", Some("a"), 0)]);
        let mut sink = BufferSink::new();
        let passed = case
            .run(&analyzer, &mut sink, &RunOptions::default())
            .unwrap();
        assert!(passed);
        assert!(sink.as_text().is_empty());
    }

    #[test]
    fn mismatch_renders_both_blocks() {
        let case = case("x\n// ----\n// Warning: a\n");
        let analyzer = scripted(vec![Diagnostic::new("TypeError", Some("b"), 0)]);
        let mut sink = BufferSink::new();
        let passed = case
            .run(&analyzer, &mut sink, &RunOptions::default())
            .unwrap();
        assert!(!passed);
        let text = sink.as_text();
        assert!(text.contains("Expected result:\n  Warning: a\n"));
        assert!(text.contains("Obtained result:\n  TypeError: b\n"));
        assert!(text.contains("Diff:\n"));
    }

    #[test]
    fn analyzer_failure_is_propagated() {
        let case = case("x\n// ----\n");
        let analyzer = |_: &str, _: &AnalysisSettings| -> Result<Vec<Diagnostic>, SyntestError> {
            Err(SyntestError::analysis("front-end crashed"))
        };
        let mut sink = BufferSink::new();
        let result = case.run(&analyzer, &mut sink, &RunOptions::default());
        assert!(matches!(result, Err(SyntestError::Analysis { .. })));
    }

    #[test]
    fn fixture_example_from_the_wire_format() {
        let case = case(
            "pragma solidity >=0.0;\ncontract C { function f() public; }\n// ----\n// Warning: foo bar\n",
        );
        let diagnostics = vec![Diagnostic::new("Warning", Some("foo bar"), 23)];
        assert!(case.matches(&diagnostics));
    }
}
