//! End-to-end report generation.
//!
//! [`pipeline::ReportGenerator`] validates a request, fans per-game work out
//! and gathers the tables for the cross-game rollup.

pub mod pipeline;

pub use pipeline::{PeriodSelection, ReportBundle, ReportGenerator, ReportRequest};
