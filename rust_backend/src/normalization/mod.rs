//! Label normalization for periods, placements and sponsors.
//!
//! - [`labels`]: raw label → canonical label
//! - [`ordering`]: pluggable ordering of canonical period labels

pub mod labels;
pub mod ordering;


pub use labels::{normalize_period, normalize_placement, sponsor_name};
pub use ordering::{BoardSegmentOrdering, PeriodOrderPolicy, PeriodOrdering, QuarterAwareOrdering};
