//! Colored rendering of expected and obtained diagnostic lists.
//!
//! Comparison logic stays color-agnostic: everything renders through the
//! [`ReportSink`] seam, so tests capture output with a [`BufferSink`]
//! instead of scraping the console. [`TermSink`] is the production sink
//! over a `termcolor` stream.

use std::io::Write;

use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::analysis::Diagnostic;
use crate::fixture::Expectation;

/// Semantic color tag for a piece of report text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Failure,
    Plain,
}

impl Tone {
    fn color(self) -> Option<Color> {
        match self {
            Tone::Success => Some(Color::Green),
            Tone::Warning => Some(Color::Yellow),
            Tone::Failure => Some(Color::Red),
            Tone::Plain => None,
        }
    }
}

/// Minimal sink interface: write a piece of text under a color tag.
pub trait ReportSink {
    fn write(&mut self, text: &str, tone: Tone);
}

/// Writes colored report text to a standard stream.
pub struct TermSink {
    stream: StandardStream,
}

impl TermSink {
    pub fn stdout(choice: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stdout(choice),
        }
    }

    pub fn stderr(choice: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stderr(choice),
        }
    }
}

impl ReportSink for TermSink {
    fn write(&mut self, text: &str, tone: Tone) {
        if let Some(color) = tone.color() {
            let _ = self.stream.set_color(ColorSpec::new().set_fg(Some(color)));
        }
        let _ = write!(self.stream, "{}", text);
        let _ = self.stream.reset();
    }
}

/// Collects report text (with its tones) into memory for tests or
/// programmatic capture.
#[derive(Debug, Default)]
pub struct BufferSink {
    pub chunks: Vec<(Tone, String)>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured text, tones dropped.
    pub fn as_text(&self) -> String {
        self.chunks.iter().map(|(_, text)| text.as_str()).collect()
    }

    /// Replays every captured chunk into another sink, preserving tones.
    pub fn replay(&self, sink: &mut dyn ReportSink) {
        for (tone, text) in &self.chunks {
            sink.write(text, *tone);
        }
    }
}

impl ReportSink for BufferSink {
    fn write(&mut self, text: &str, tone: Tone) {
        self.chunks.push((tone, text.to_string()));
    }
}

fn tone_for(type_name: &str) -> Tone {
    if type_name == "Warning" {
        Tone::Warning
    } else {
        Tone::Failure
    }
}

/// Renders the expectation list: green `Success` when empty, otherwise one
/// line per expectation, yellow for warnings, red for everything else.
pub fn render_expected(
    sink: &mut dyn ReportSink,
    expectations: &[Expectation],
    prefix: &str,
) {
    if expectations.is_empty() {
        sink.write(&format!("{prefix}Success\n"), Tone::Success);
        return;
    }
    for expectation in expectations {
        sink.write(
            &format!("{prefix}{}: {}\n", expectation.type_name, expectation.message),
            tone_for(&expectation.type_name),
        );
    }
}

/// Renders an obtained diagnostic list with the same coloring as
/// [`render_expected`]. When `line_numbers` is set, each line carries a
/// `(line): ` prefix recovered from the diagnostic offset where possible.
pub fn render_diagnostics(
    sink: &mut dyn ReportSink,
    diagnostics: &[Diagnostic],
    source: &str,
    preamble_len: usize,
    prefix: &str,
    ignore_warnings: bool,
    line_numbers: bool,
) {
    let shown: Vec<_> = diagnostics
        .iter()
        .filter(|d| !(ignore_warnings && d.is_warning()))
        .collect();
    if shown.is_empty() {
        sink.write(&format!("{prefix}Success\n"), Tone::Success);
        return;
    }
    for diagnostic in shown {
        let mut text = String::from(prefix);
        if line_numbers {
            if let Some(line) = line_number(source, preamble_len, diagnostic.offset) {
                text.push_str(&format!("({line}): "));
            }
        }
        text.push_str(&format!(
            "{}: {}\n",
            diagnostic.type_name,
            diagnostic.escaped_message()
        ));
        sink.write(&text, tone_for(&diagnostic.type_name));
    }
}

/// Recovers a 1-based line number from a diagnostic offset.
///
/// The analyzer computes offsets against source with its synthetic preamble
/// prepended, so the preamble length is subtracted first; the adjusted
/// offset must land inside the fixture source or no line is recovered.
pub fn line_number(source: &str, preamble_len: usize, offset: usize) -> Option<usize> {
    let adjusted = offset.checked_sub(preamble_len)?;
    if adjusted >= source.len() {
        return None;
    }
    let newlines = source.as_bytes()[..adjusted]
        .iter()
        .filter(|&&b| b == b'\n')
        .count();
    Some(1 + newlines)
}

/// Renders a line diff between the expected and obtained blocks: removed
/// (expected-only) lines in red, added (obtained-only) lines in green.
pub fn render_diff(
    sink: &mut dyn ReportSink,
    expected: &str,
    obtained: &str,
    prefix: &str,
) {
    let changeset = Changeset::new(expected.trim_end(), obtained.trim_end(), "\n");
    for diff in &changeset.diffs {
        let (marker, tone, text) = match diff {
            Difference::Same(text) => (' ', Tone::Plain, text),
            Difference::Add(text) => ('+', Tone::Success, text),
            Difference::Rem(text) => ('-', Tone::Failure, text),
        };
        for line in text.lines() {
            sink.write(&format!("{prefix}{marker}{line}\n"), tone);
        }
    }
}
