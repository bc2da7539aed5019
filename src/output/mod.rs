//! Output formatting for report results

pub mod json;
pub mod stats;
pub mod tree;

pub use json::ReportEmitter;
pub use stats::StatsReporter;
