//! `HH:MM:SS` duration codec used in every report cell.
//!
//! Durations are carried as floating-point milliseconds throughout the
//! engine and only turned into text at table-build time. Formatting rounds
//! *up* to the next whole second, so a 500 ms appearance still shows as one
//! second on the report.

use anyhow::{bail, Context, Result};

/// Placeholder used by the aggregate table when no game had activity.
pub const ZERO_HHMMSS: &str = "00:00:00";

/// Format milliseconds as zero-padded `HH:MM:SS`.
///
/// The value is converted to seconds with a ceiling. Zero (or anything
/// that rounds to zero, including negative input) formats as the empty
/// string. Hours are not capped at 24.
///
/// # Examples
///
/// ```
/// use exposure_report::time::duration::ms_to_hhmmss;
///
/// assert_eq!(ms_to_hhmmss(0.0), "");
/// assert_eq!(ms_to_hhmmss(500.0), "00:00:01");
/// assert_eq!(ms_to_hhmmss(3_661_000.0), "01:01:01");
/// assert_eq!(ms_to_hhmmss(90_000_000.0), "25:00:00");
/// ```
pub fn ms_to_hhmmss(total_ms: f64) -> String {
    let total_s = (total_ms / 1000.0).ceil();
    if total_s.is_nan() || total_s < 1.0 {
        return String::new();
    }
    let total_s = total_s as u64;
    let hours = total_s / 3600;
    let minutes = (total_s % 3600) / 60;
    let seconds = total_s % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Parse an `HH:MM:SS` cell back into milliseconds.
///
/// The empty string parses as zero, mirroring [`ms_to_hhmmss`]. Each of the
/// three components must be a non-negative integer; hours may have any
/// number of digits.
///
/// # Examples
///
/// ```
/// use exposure_report::time::duration::hhmmss_to_ms;
///
/// assert_eq!(hhmmss_to_ms("").unwrap(), 0);
/// assert_eq!(hhmmss_to_ms("01:01:01").unwrap(), 3_661_000);
/// assert!(hhmmss_to_ms("1:01").is_err());
/// ```
pub fn hhmmss_to_ms(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() != 3 {
        bail!("Expected HH:MM:SS, got '{}'", text);
    }

    let mut values = [0u64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse::<u64>()
            .with_context(|| format!("Invalid duration component '{}' in '{}'", part, text))?;
    }

    let [hours, minutes, seconds] = values;
    hours
        .checked_mul(3600)
        .and_then(|s| s.checked_add(minutes.checked_mul(60)?))
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .with_context(|| format!("Duration '{}' is too large", text))
}
