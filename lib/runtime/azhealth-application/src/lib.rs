//! Collect, analyze and report stages plus the driver that sequences them.

pub mod analyzer;
pub mod collector;
pub mod pipeline;
pub mod reporter;

#[cfg(test)]
pub(crate) mod testing;

pub use analyzer::analyze;
pub use collector::{CancellationFlag, Collector};
pub use pipeline::{HealthReportPipeline, PipelineError, PipelineOptions, RunSummary};
pub use reporter::{render_html, write_report};
