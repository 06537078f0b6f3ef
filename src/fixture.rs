//! Fixture parsing: splits a test file into a source region and an ordered
//! list of expected diagnostics.
//!
//! A fixture file is the source snippet, a delimiter line, and zero or more
//! trailing comment lines declaring the expected diagnostics:
//!
//! ```text
//! contract C { function f() public; }
//! // ----
//! // Warning: no visibility specified
//! // TypeError: function without implementation
//! ```
//!
//! Everything before the first line starting with `// ----` is source (the
//! delimiter line belongs to neither region). Each remaining line is parsed
//! by [`parse_expectation_line`]; expectations keep their line order, which
//! must align positionally with the diagnostics the analyzer produces.

use std::io::{self, BufRead};

/// A line starting with this token separates source from expectations.
pub const DELIMITER: &str = "// ----";

/// An expected diagnostic: a short type label and a newline-escaped message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub type_name: String,
    pub message: String,
}

impl Expectation {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// The parsed content of one fixture file.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub source: String,
    pub expectations: Vec<Expectation>,
}

/// Parses a fixture from any buffered reader.
///
/// A file with no delimiter is all source and expects zero diagnostics.
pub fn parse(reader: impl BufRead) -> io::Result<Fixture> {
    let mut fixture = Fixture::default();
    let mut in_expectations = false;
    for line in reader.lines() {
        let line = line?;
        if !in_expectations {
            if line.starts_with(DELIMITER) {
                in_expectations = true;
                continue;
            }
            fixture.source.push_str(&line);
            fixture.source.push('\n');
        } else if let Some(expectation) = parse_expectation_line(&line) {
            fixture.expectations.push(expectation);
        }
    }
    Ok(fixture)
}

/// Parses one expectation line, or `None` if the line holds no expectation.
///
/// The comment marker (any run of leading slashes) and leading whitespace
/// are stripped. The first colon separates type from message; the message
/// may itself contain colons. A line with no colon yields the whole
/// remainder as the type and an empty message.
pub fn parse_expectation_line(line: &str) -> Option<Expectation> {
    let rest = skip_whitespace(skip_slashes(line));
    if rest.is_empty() {
        return None;
    }
    match rest.split_once(':') {
        Some((type_name, message)) => Some(Expectation::new(
            type_name.trim(),
            skip_whitespace(message),
        )),
        None => Some(Expectation::new(rest, "")),
    }
}

/// Advances past any run of leading `/` characters.
pub fn skip_slashes(s: &str) -> &str {
    s.trim_start_matches('/')
}

/// Advances past leading whitespace.
pub fn skip_whitespace(s: &str) -> &str {
    s.trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_str(text: &str) -> Fixture {
        parse(Cursor::new(text)).unwrap()
    }

    #[test]
    fn splits_source_and_expectations() {
        let fixture = parse_str(
            "contract C {}\n\
             // ----\n\
             // Warning: foo bar\n",
        );
        assert_eq!(fixture.source, "contract C {}\n");
        assert_eq!(
            fixture.expectations,
            vec![Expectation::new("Warning", "foo bar")]
        );
    }

    #[test]
    fn file_without_delimiter_is_all_source() {
        let fixture = parse_str("line one\nline two");
        assert_eq!(fixture.source, "line one\nline two\n");
        assert!(fixture.expectations.is_empty());
    }

    #[test]
    fn delimiter_line_belongs_to_neither_region() {
        let fixture = parse_str("a\n// ---- anything after the token\nb\n");
        assert_eq!(fixture.source, "a\n");
        // "b" has no marker to strip but still parses as a colon-free line
        assert_eq!(fixture.expectations, vec![Expectation::new("b", "")]);
    }

    #[test]
    fn expectations_keep_line_order() {
        let fixture = parse_str(
            "x\n// ----\n// TypeError: first\n// Warning: second\n",
        );
        let types: Vec<_> = fixture
            .expectations
            .iter()
            .map(|e| e.type_name.as_str())
            .collect();
        assert_eq!(types, vec!["TypeError", "Warning"]);
    }

    #[test]
    fn blank_lines_after_marker_are_skipped() {
        let fixture = parse_str("x\n// ----\n//\n//   \n\n// Warning: w\n");
        assert_eq!(fixture.expectations.len(), 1);
    }

    #[test]
    fn only_first_colon_separates_type_from_message() {
        let expectation =
            parse_expectation_line("// TypeError: expected `;`: got `:`").unwrap();
        assert_eq!(expectation.type_name, "TypeError");
        assert_eq!(expectation.message, "expected `;`: got `:`");
    }

    #[test]
    fn line_without_colon_is_all_type() {
        let expectation = parse_expectation_line("//// Warning").unwrap();
        assert_eq!(expectation.type_name, "Warning");
        assert_eq!(expectation.message, "");
    }

    #[test]
    fn marker_slashes_and_whitespace_are_flexible() {
        let expectation =
            parse_expectation_line("/////   Warning:   spaced out").unwrap();
        assert_eq!(expectation.type_name, "Warning");
        assert_eq!(expectation.message, "spaced out");
    }

    #[test]
    fn type_is_trimmed_before_the_colon() {
        let expectation = parse_expectation_line("// Warning : message").unwrap();
        assert_eq!(expectation.type_name, "Warning");
        assert_eq!(expectation.message, "message");
    }
}
