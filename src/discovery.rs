//! Recursive fixture discovery and suite execution.
//!
//! Discovery mirrors the filesystem: every directory becomes a named group,
//! every leaf file becomes exactly one test case, with no extension
//! filtering.
//! The tree is built once, sequentially, before any case runs; entries are
//! sorted so execution order is deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::analysis::Analyzer;
use crate::case::{RunOptions, SyntaxCase};
use crate::errors::SyntestError;
use crate::report::{ReportSink, Tone};

/// A node in the registration tree: a leaf case or a composite group.
#[derive(Debug, Clone)]
pub enum TestUnit {
    Case { name: String, path: PathBuf },
    Group { name: String, units: Vec<TestUnit> },
}

impl TestUnit {
    pub fn name(&self) -> &str {
        match self {
            TestUnit::Case { name, .. } | TestUnit::Group { name, .. } => name,
        }
    }

    /// Number of leaf cases registered under this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            TestUnit::Case { .. } => 1,
            TestUnit::Group { units, .. } => units.iter().map(TestUnit::leaf_count).sum(),
        }
    }
}

/// Builds the registration tree for `base.join(rel)`. Directories recurse
/// into a group named after the directory; files register one case each.
pub fn build_tree(base: &Path, rel: &Path) -> Result<TestUnit, SyntestError> {
    let full = base.join(rel);
    let name = rel
        .file_name()
        .or_else(|| full.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| full.display().to_string());

    if full.is_dir() {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&full).map_err(|e| SyntestError::io(&full, e))? {
            let entry = entry.map_err(|e| SyntestError::io(&full, e))?;
            entries.push(entry.file_name());
        }
        entries.sort();

        let mut units = Vec::with_capacity(entries.len());
        for entry in entries {
            units.push(build_tree(base, &rel.join(entry))?);
        }
        Ok(TestUnit::Group { name, units })
    } else {
        let name = full
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or(name);
        Ok(TestUnit::Case { name, path: full })
    }
}

/// Flat, sorted enumeration of every fixture file under `root`.
pub fn discover_fixture_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, SyntestError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Outcome counts for one suite run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Runs every case in the tree sequentially, rendering `PASS`/`FAIL` lines
/// and mismatch reports into the sink, followed by a summary line.
///
/// A mismatch is recoverable and the run continues with the next case; I/O
/// failures and hard analyzer failures abort the run.
pub fn run_tree(
    unit: &TestUnit,
    analyzer: &dyn Analyzer,
    sink: &mut dyn ReportSink,
    options: &RunOptions,
    filter: Option<&str>,
) -> Result<RunSummary, SyntestError> {
    let mut summary = RunSummary::default();
    run_unit(unit, analyzer, sink, options, filter, &mut summary)?;

    sink.write(
        &format!("\nTest summary: total {}, ", summary.total()),
        Tone::Plain,
    );
    sink.write(&format!("passed {}", summary.passed), Tone::Success);
    sink.write(", ", Tone::Plain);
    sink.write(&format!("failed {}", summary.failed), Tone::Failure);
    sink.write(", ", Tone::Plain);
    sink.write(&format!("skipped {}\n", summary.skipped), Tone::Warning);

    Ok(summary)
}

fn run_unit(
    unit: &TestUnit,
    analyzer: &dyn Analyzer,
    sink: &mut dyn ReportSink,
    options: &RunOptions,
    filter: Option<&str>,
    summary: &mut RunSummary,
) -> Result<(), SyntestError> {
    match unit {
        TestUnit::Group { units, .. } => {
            for unit in units {
                run_unit(unit, analyzer, sink, options, filter, summary)?;
            }
        }
        TestUnit::Case { name, path } => {
            if let Some(filter) = filter {
                if !name.to_lowercase().contains(&filter.to_lowercase()) {
                    summary.skipped += 1;
                    sink.write(&format!("SKIP: {} [{}]\n", name, path.display()), Tone::Warning);
                    return Ok(());
                }
            }

            let case = SyntaxCase::from_file(path)?;
            // Buffer the mismatch report so the FAIL line can come first.
            let mut report = crate::report::BufferSink::new();
            let mut case_options = options.clone();
            case_options.line_prefix = format!("{}{}", options.line_prefix, "  ");

            if case.run(analyzer, &mut report, &case_options)? {
                summary.passed += 1;
                sink.write(&format!("PASS: {} [{}]\n", name, path.display()), Tone::Success);
            } else {
                summary.failed += 1;
                sink.write(&format!("FAIL: {} [{}]\n", name, path.display()), Tone::Failure);
                report.replay(sink);
            }
        }
    }
    Ok(())
}
