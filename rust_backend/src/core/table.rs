//! Report tables handed to spreadsheet/CSV writers.
//!
//! Tables are typed row records plus the ordered list of period columns.
//! Writers that only care about text use [`GameReportTable::headers`] /
//! [`GameReportTable::rows`] (and the aggregate equivalents), which flatten
//! every row into ordered string cells.

use serde::{Deserialize, Serialize};

/// Maximum length of a spreadsheet tab name.
pub const SHEET_NAME_LIMIT: usize = 31;

pub const COL_SPONSOR: &str = "Sponsor";
pub const COL_PLACEMENT: &str = "Placement";
pub const COL_TOTAL_SHOTS: &str = "Total Shots";
pub const COL_TOTAL_DURATION: &str = "Total Duration";
pub const COL_AVG_SCREEN: &str = "Avg Screen %";
pub const COL_AVG_SHOTS: &str = "Avg Shots";
pub const COL_AVG_TOTAL_DURATION: &str = "Avg Total Duration";

/// One sponsor/placement line of a per-game report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReportRow {
    pub sponsor: String,
    pub placement: String,
    pub total_shots: u64,
    /// `HH:MM:SS`, empty for zero
    pub total_duration: String,
    /// Two decimals with a `%` suffix
    pub avg_screen: String,
    /// One `HH:MM:SS` cell per entry of the table's `periods`
    pub period_durations: Vec<String>,
}

/// Exposure report for a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReportTable {
    pub game_id: String,
    pub periods: Vec<String>,
    pub rows: Vec<GameReportRow>,
}

impl GameReportTable {
    pub fn headers(&self) -> Vec<String> {
        [
            COL_SPONSOR,
            COL_PLACEMENT,
            COL_TOTAL_SHOTS,
            COL_TOTAL_DURATION,
            COL_AVG_SCREEN,
        ]
        .iter()
        .map(|s| s.to_string())
        .chain(self.periods.iter().cloned())
        .collect()
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut cells = vec![
                    row.sponsor.clone(),
                    row.placement.clone(),
                    row.total_shots.to_string(),
                    row.total_duration.clone(),
                    row.avg_screen.clone(),
                ];
                cells.extend(row.period_durations.iter().cloned());
                cells
            })
            .collect()
    }

    /// Index of a period column, if this table has it.
    pub fn period_index(&self, period: &str) -> Option<usize> {
        self.periods.iter().position(|p| p == period)
    }

    /// Tab name for this table.
    pub fn sheet_name(&self) -> String {
        sheet_name(&self.game_id)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One placement line of the cross-game report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReportRow {
    pub placement: String,
    pub avg_shots: u64,
    pub avg_total_duration: String,
    pub avg_screen: String,
    /// One cell per entry of the table's `periods`
    pub avg_period_durations: Vec<String>,
}

/// Placement-level averages across all games of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReportTable {
    pub periods: Vec<String>,
    pub rows: Vec<AggregateReportRow>,
}

impl AggregateReportTable {
    pub const SHEET_NAME: &'static str = "Aggregate";

    pub fn headers(&self) -> Vec<String> {
        [
            COL_PLACEMENT,
            COL_AVG_SHOTS,
            COL_AVG_TOTAL_DURATION,
            COL_AVG_SCREEN,
        ]
        .iter()
        .map(|s| s.to_string())
        .chain(self.periods.iter().map(|p| format!("Avg {}", p)))
        .collect()
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut cells = vec![
                    row.placement.clone(),
                    row.avg_shots.to_string(),
                    row.avg_total_duration.clone(),
                    row.avg_screen.clone(),
                ];
                cells.extend(row.avg_period_durations.iter().cloned());
                cells
            })
            .collect()
    }

    pub fn row(&self, placement: &str) -> Option<&AggregateReportRow> {
        self.rows.iter().find(|row| row.placement == placement)
    }
}

/// Flattened sheet: name, header line and string cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetView {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl From<&GameReportTable> for SheetView {
    fn from(table: &GameReportTable) -> Self {
        Self {
            name: table.sheet_name(),
            headers: table.headers(),
            rows: table.rows(),
        }
    }
}

impl From<&AggregateReportTable> for SheetView {
    fn from(table: &AggregateReportTable) -> Self {
        Self {
            name: AggregateReportTable::SHEET_NAME.to_string(),
            headers: table.headers(),
            rows: table.rows(),
        }
    }
}

/// Canonical game identifier: spaces become underscores.
pub fn sanitize_game_id(raw: &str) -> String {
    raw.trim().replace(' ', "_")
}

/// Game id truncated to the spreadsheet tab-name limit.
pub fn sheet_name(game_id: &str) -> String {
    game_id.chars().take(SHEET_NAME_LIMIT).collect()
}

/// File stem for a generated report: the game ids joined by `_`, with an
/// `_Aggregate` suffix when the cross-game sheet is included.
pub fn report_file_stem<S: AsRef<str>>(game_ids: &[S], aggregate: bool) -> String {
    let joined = game_ids
        .iter()
        .map(|id| id.as_ref())
        .collect::<Vec<_>>()
        .join("_");
    if aggregate {
        format!("{}_Aggregate", joined)
    } else {
        joined
    }
}
