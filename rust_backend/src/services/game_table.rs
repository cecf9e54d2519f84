//! Per-game report table.

use crate::core::table::{GameReportRow, GameReportTable};
use crate::services::sponsors::SponsorStatsTable;
use crate::time::duration::ms_to_hhmmss;

/// Render sponsor statistics as a game report.
///
/// Emits one row per sponsor/placement bucket with at least one shot, in
/// bucket order, and one duration column per entry of `periods`. Periods
/// with no activity render as empty cells.
pub fn build_game_table(
    game_id: &str,
    sponsor_stats: &SponsorStatsTable,
    periods: &[String],
) -> GameReportTable {
    let rows = sponsor_stats
        .iter()
        .filter_map(|(key, stats)| {
            let average = stats.average_screen_percentage()?;
            Some(GameReportRow {
                sponsor: key.sponsor.clone(),
                placement: key.placement.clone(),
                total_shots: stats.count,
                total_duration: ms_to_hhmmss(stats.total_duration_ms),
                avg_screen: format_percentage(average),
                period_durations: periods
                    .iter()
                    .map(|period| ms_to_hhmmss(stats.period_duration_ms(period)))
                    .collect(),
            })
        })
        .collect();

    GameReportTable {
        game_id: game_id.to_string(),
        periods: periods.to_vec(),
        rows,
    }
}

/// Two decimals with a `%` suffix, e.g. `"10.00%"`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Inverse of [`format_percentage`]; the `%` suffix is optional.
pub fn parse_percentage(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    trimmed
        .strip_suffix('%')
        .unwrap_or(trimmed)
        .trim()
        .parse::<f64>()
        .ok()
}
