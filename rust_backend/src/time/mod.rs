//! Time formatting utilities.
//!
//! - [`duration`]: millisecond ⇄ `HH:MM:SS` codec used by report cells

pub mod duration;

pub use duration::{hhmmss_to_ms, ms_to_hhmmss, ZERO_HHMMSS};
