//! Ordering strategies for canonical period labels.
//!
//! Two families of period labels show up in the telemetry: board segments
//! (`"3 Top"`, `"3 Bottom"`) and quarters (`"Q1"`..`"Q4"`, `"OT"`). Which
//! family should come first in a report is a per-deployment decision, so the
//! ordering is a strategy rather than a fixed rule.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A comparator over canonical period labels.
///
/// Implementations must define a total order so that sorting is
/// deterministic for any set of labels.
pub trait PeriodOrdering {
    fn compare(&self, a: &str, b: &str) -> Ordering;

    /// Sort labels in place according to this ordering.
    fn sort(&self, periods: &mut [String]) {
        periods.sort_by(|a, b| self.compare(a, b));
    }
}

/// Side of a board segment. `Top` sorts before `Bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Half {
    Top,
    Bottom,
}

/// Parse `"<number> <Top|Bottom>"`.
fn parse_board_segment(label: &str) -> Option<(u64, Half)> {
    let (number, half) = label.split_once(' ')?;
    let number = number.parse::<u64>().ok()?;
    let half = if half.eq_ignore_ascii_case("top") {
        Half::Top
    } else if half.eq_ignore_ascii_case("bottom") {
        Half::Bottom
    } else {
        return None;
    };
    Some((number, half))
}

/// Parse `"Q1"`..`"Q4"` as ordinals 1–4 and `"OT"` as ordinal 5.
fn parse_quarter(label: &str) -> Option<u8> {
    if label.eq_ignore_ascii_case("ot") {
        return Some(5);
    }
    let digits = label.strip_prefix(['Q', 'q'])?;
    match digits {
        "1" => Some(1),
        "2" => Some(2),
        "3" => Some(3),
        "4" => Some(4),
        _ => None,
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Quarter(u8),
    Board(u64, Half),
    Text(&'a str),
}

/// Numbered board segments first, then free text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardSegmentOrdering;

impl BoardSegmentOrdering {
    fn key<'a>(&self, label: &'a str) -> SortKey<'a> {
        match parse_board_segment(label) {
            Some((number, half)) => SortKey::Board(number, half),
            None => SortKey::Text(label),
        }
    }
}

impl PeriodOrdering for BoardSegmentOrdering {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.key(a).cmp(&self.key(b)).then_with(|| a.cmp(b))
    }
}

/// Quarters and overtime first, then board segments, then free text.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuarterAwareOrdering;

impl QuarterAwareOrdering {
    fn key<'a>(&self, label: &'a str) -> SortKey<'a> {
        if let Some(ordinal) = parse_quarter(label) {
            return SortKey::Quarter(ordinal);
        }
        BoardSegmentOrdering.key(label)
    }
}

impl PeriodOrdering for QuarterAwareOrdering {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.key(a).cmp(&self.key(b)).then_with(|| a.cmp(b))
    }
}

/// Built-in ordering selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodOrderPolicy {
    /// `"<n> Top"`/`"<n> Bottom"` numerically, free text after.
    #[default]
    Board,
    /// `Q1`..`Q4`, `OT`, then board segments, then free text.
    Quarter,
}

impl PeriodOrdering for PeriodOrderPolicy {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            PeriodOrderPolicy::Board => BoardSegmentOrdering.compare(a, b),
            PeriodOrderPolicy::Quarter => QuarterAwareOrdering.compare(a, b),
        }
    }
}
