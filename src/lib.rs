pub use crate::analysis::{AnalysisSettings, Analyzer, Diagnostic};
pub use crate::case::{RunOptions, SyntaxCase};
pub use crate::discovery::{RunSummary, TestUnit};
pub use crate::errors::SyntestError;
pub use crate::fixture::{Expectation, Fixture};
pub use crate::report::{BufferSink, ReportSink, TermSink, Tone};

pub mod analysis;
pub mod case;
pub mod cli;
pub mod discovery;
pub mod errors;
pub mod fixture;
pub mod report;
