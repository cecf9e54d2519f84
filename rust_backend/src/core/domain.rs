//! Domain models for sponsorship exposure telemetry.
//!
//! This module provides the records parsed from a game document (logos and
//! shots) and the statistics accumulated from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Composite identity shared by a logo and the shots that show it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LogoKey {
    pub file_name: String,
    pub group_id: i64,
}

impl LogoKey {
    pub fn new(file_name: impl Into<String>, group_id: i64) -> Self {
        Self {
            file_name: file_name.into(),
            group_id,
        }
    }
}

/// A tracked sponsor logo instance within a game broadcast.
///
/// # Fields
///
/// * `file_name` - Logo art file name, e.g. `"Nike(2).png"`
/// * `group_id` - Tracker group identifier
/// * `placement` - Raw placement label as reported by the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoRecord {
    pub file_name: String,
    pub group_id: i64,
    pub placement: String,
}

impl LogoRecord {
    pub fn new(file_name: impl Into<String>, group_id: i64, placement: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            group_id,
            placement: placement.into(),
        }
    }

    pub fn key(&self) -> LogoKey {
        LogoKey::new(self.file_name.clone(), self.group_id)
    }
}

/// One detected on-screen appearance of a logo.
///
/// # Fields
///
/// * `file_name`, `group_id` - Identity of the logo shown
/// * `period` - Raw period label
/// * `duration_ms` - Time on screen in milliseconds
/// * `screen_percentage` - Share of the frame covered by the logo (0–100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub file_name: String,
    pub group_id: i64,
    pub period: String,
    pub duration_ms: f64,
    pub screen_percentage: f64,
}

impl ShotRecord {
    pub fn new(
        file_name: impl Into<String>,
        group_id: i64,
        period: impl Into<String>,
        duration_ms: f64,
        screen_percentage: f64,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            group_id,
            period: period.into(),
            duration_ms,
            screen_percentage,
        }
    }

    pub fn key(&self) -> LogoKey {
        LogoKey::new(self.file_name.clone(), self.group_id)
    }
}

/// Descriptive game metadata. Only `game_id` is used by the engine; the
/// remaining fields are kept for file naming by callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    pub game_id: String,
    pub date: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
}

/// One parsed input document: everything known about a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDocument {
    pub info: GameInfo,
    pub logos: Vec<LogoRecord>,
    pub shots: Vec<ShotRecord>,
}

impl GameDocument {
    pub fn game_id(&self) -> &str {
        &self.info.game_id
    }
}

/// Exposure statistics accumulated for one logo identity or one
/// sponsor/placement pair.
///
/// `total_duration_ms` always equals the sum of `per_period_duration_ms`
/// because both are only ever updated together by [`ExposureStats::record`]
/// and [`ExposureStats::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExposureStats {
    pub count: u64,
    pub total_duration_ms: f64,
    pub screen_percentage_sum: f64,
    pub per_period_duration_ms: BTreeMap<String, f64>,
}

/// Per-identity accumulator produced by the shot/logo join.
pub type IdentityStats = ExposureStats;

/// Per sponsor/placement accumulator produced by the sponsor aggregator.
pub type SponsorStats = ExposureStats;

impl ExposureStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a single shot in an already-normalized period.
    pub fn record(&mut self, period: &str, duration_ms: f64, screen_percentage: f64) {
        self.count += 1;
        self.total_duration_ms += duration_ms;
        self.screen_percentage_sum += screen_percentage;
        *self
            .per_period_duration_ms
            .entry(period.to_string())
            .or_insert(0.0) += duration_ms;
    }

    /// Fold another accumulator into this one, key-wise for periods.
    pub fn merge(&mut self, other: &ExposureStats) {
        self.count += other.count;
        self.total_duration_ms += other.total_duration_ms;
        self.screen_percentage_sum += other.screen_percentage_sum;
        for (period, ms) in &other.per_period_duration_ms {
            *self
                .per_period_duration_ms
                .entry(period.clone())
                .or_insert(0.0) += ms;
        }
    }

    /// Duration accumulated in `period`, zero when none.
    pub fn period_duration_ms(&self, period: &str) -> f64 {
        self.per_period_duration_ms
            .get(period)
            .copied()
            .unwrap_or(0.0)
    }

    /// Mean screen coverage per shot, `None` without shots.
    pub fn average_screen_percentage(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.screen_percentage_sum / self.count as f64)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Sponsor/placement pair keying the per-game report rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SponsorKey {
    pub sponsor: String,
    pub placement: String,
}

impl SponsorKey {
    pub fn new(sponsor: impl Into<String>, placement: impl Into<String>) -> Self {
        Self {
            sponsor: sponsor.into(),
            placement: placement.into(),
        }
    }
}
