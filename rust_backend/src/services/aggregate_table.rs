//! Cross-game rollup of per-game report tables.
//!
//! The rollup works on the *rendered* game tables: durations are read back
//! from their `HH:MM:SS` cells and screen coverage from the two-decimal
//! percentages, so the aggregate agrees with what each game sheet shows.
//!
//! Averages are unweighted across games. The screen percentage in
//! particular is a mean of per-game means, which is deliberately not the
//! same as a shot-weighted average.

use std::collections::{BTreeMap, HashMap};

use crate::core::table::{AggregateReportRow, AggregateReportTable, GameReportTable};
use crate::error::{ReportError, ReportResult};
use crate::services::game_table::{format_percentage, parse_percentage};
use crate::time::duration::{hhmmss_to_ms, ms_to_hhmmss, ZERO_HHMMSS};

/// Totals of one placement within one game.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSample {
    pub shots: u64,
    pub duration_ms: u64,
    /// Arithmetic mean of the sponsor rows' average screen percentages
    pub avg_screen: f64,
    /// Summed duration per requested period, aligned with the period list
    pub period_ms: Vec<u64>,
}

/// Per-game samples of one placement, folded across games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementAccumulator {
    shots: Vec<u64>,
    durations_ms: Vec<u64>,
    screens: Vec<f64>,
    /// Only strictly positive per-game values, aligned with the period list
    active_period_ms: Vec<Vec<u64>>,
}

impl PlacementAccumulator {
    fn new(period_count: usize) -> Self {
        Self {
            active_period_ms: vec![Vec::new(); period_count],
            ..Self::default()
        }
    }

    pub fn add(&mut self, sample: PlacementSample) {
        self.shots.push(sample.shots);
        self.durations_ms.push(sample.duration_ms);
        self.screens.push(sample.avg_screen);
        for (bucket, ms) in self.active_period_ms.iter_mut().zip(sample.period_ms) {
            if ms > 0 {
                bucket.push(ms);
            }
        }
    }

    pub fn games(&self) -> usize {
        self.shots.len()
    }

    fn into_row(self, placement: String) -> AggregateReportRow {
        let avg_shots = mean(self.shots.iter().map(|&s| s as f64)).ceil() as u64;
        let avg_duration = mean(self.durations_ms.iter().map(|&ms| ms as f64));
        let avg_screen = mean(self.screens.iter().copied());

        let avg_period_durations = self
            .active_period_ms
            .iter()
            .map(|values| {
                if values.is_empty() {
                    ZERO_HHMMSS.to_string()
                } else {
                    ms_to_hhmmss(mean(values.iter().map(|&ms| ms as f64)))
                }
            })
            .collect();

        AggregateReportRow {
            placement,
            avg_shots,
            avg_total_duration: ms_to_hhmmss(avg_duration),
            avg_screen: format_percentage(avg_screen),
            avg_period_durations,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Group one game's rows by placement.
///
/// Placements come back sorted by name. Period columns missing from the
/// game's table count as empty.
pub fn placement_samples(
    table: &GameReportTable,
    periods: &[String],
) -> ReportResult<BTreeMap<String, PlacementSample>> {
    let column_of: Vec<Option<usize>> = periods.iter().map(|p| table.period_index(p)).collect();

    #[derive(Default)]
    struct Partial {
        shots: u64,
        duration_ms: u64,
        screen_sum: f64,
        rows: usize,
        period_ms: Vec<u64>,
    }

    let mut partials: BTreeMap<String, Partial> = BTreeMap::new();
    for row in &table.rows {
        let duration_ms = parse_duration_cell(table, &row.total_duration)?;
        let screen = parse_percentage(&row.avg_screen).ok_or_else(|| {
            ReportError::MalformedTable(format!(
                "game {}: invalid screen percentage '{}'",
                table.game_id, row.avg_screen
            ))
        })?;

        let partial = partials
            .entry(row.placement.clone())
            .or_insert_with(|| Partial {
                period_ms: vec![0; periods.len()],
                ..Partial::default()
            });
        partial.shots = partial.shots.saturating_add(row.total_shots);
        partial.duration_ms = add_duration(table, partial.duration_ms, duration_ms)?;
        partial.screen_sum += screen;
        partial.rows += 1;

        for (slot, column) in partial.period_ms.iter_mut().zip(&column_of) {
            let cell = column
                .and_then(|c| row.period_durations.get(c))
                .map(String::as_str)
                .unwrap_or("");
            *slot = add_duration(table, *slot, parse_duration_cell(table, cell)?)?;
        }
    }

    Ok(partials
        .into_iter()
        .map(|(placement, p)| {
            let sample = PlacementSample {
                shots: p.shots,
                duration_ms: p.duration_ms,
                avg_screen: p.screen_sum / p.rows as f64,
                period_ms: p.period_ms,
            };
            (placement, sample)
        })
        .collect())
}

fn parse_duration_cell(table: &GameReportTable, cell: &str) -> ReportResult<u64> {
    hhmmss_to_ms(cell).map_err(|e| {
        ReportError::MalformedTable(format!("game {}: {:#}", table.game_id, e))
    })
}

fn add_duration(table: &GameReportTable, total: u64, ms: u64) -> ReportResult<u64> {
    total.checked_add(ms).ok_or_else(|| {
        ReportError::MalformedTable(format!(
            "game {}: placement duration overflows",
            table.game_id
        ))
    })
}

/// Merge per-game tables into one row per placement.
///
/// For every placement:
/// - `Avg Shots` is the ceiling of the mean per-game shot total
/// - `Avg Total Duration` is the mean per-game duration
/// - `Avg Screen %` is the mean of per-game average screen percentages
/// - `Avg <period>` averages only the games with activity in that period,
///   and is `"00:00:00"` when no game had any
///
/// Placements are listed in order of first appearance across `tables`.
pub fn build_aggregate_table(
    tables: &[GameReportTable],
    periods: &[String],
) -> ReportResult<AggregateReportTable> {
    let mut order: Vec<String> = Vec::new();
    let mut accumulators: HashMap<String, PlacementAccumulator> = HashMap::new();

    for table in tables {
        for (placement, sample) in placement_samples(table, periods)? {
            let accumulator = accumulators.entry(placement.clone()).or_insert_with(|| {
                order.push(placement.clone());
                PlacementAccumulator::new(periods.len())
            });
            accumulator.add(sample);
        }
    }

    let rows = order
        .into_iter()
        .filter_map(|placement| {
            accumulators
                .remove(&placement)
                .map(|acc| acc.into_row(placement))
        })
        .collect();

    Ok(AggregateReportTable {
        periods: periods.to_vec(),
        rows,
    })
}
