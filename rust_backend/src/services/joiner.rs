//! Shot → logo join.
//!
//! Every shot is matched to the logo it shows by `(FileName, GroupId)`.
//! Shots without a tracked logo are ordinary noise in tracker output and are
//! dropped without error; everything else is accumulated per logo identity.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::config::LabelConfig;
use crate::core::domain::{IdentityStats, LogoKey, LogoRecord, ShotRecord};
use crate::normalization::normalize_period;

/// Output of [`join_shots`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinResult {
    /// Accumulated statistics per logo identity that had at least one shot
    pub stats: HashMap<LogoKey, IdentityStats>,
    /// Distinct normalized periods seen on joined shots
    pub periods: BTreeSet<String>,
    /// Shots discarded because no logo carried their key
    pub orphan_shots: usize,
}

impl JoinResult {
    pub fn get(&self, key: &LogoKey) -> Option<&IdentityStats> {
        self.stats.get(key)
    }

    pub fn joined_shots(&self) -> u64 {
        self.stats.values().map(|s| s.count).sum()
    }
}

/// Join shots to logos and accumulate per-identity statistics.
///
/// The accumulation is commutative, so shot order does not matter.
pub fn join_shots(logos: &[LogoRecord], shots: &[ShotRecord], config: &LabelConfig) -> JoinResult {
    let known: HashSet<(&str, i64)> = logos
        .iter()
        .map(|logo| (logo.file_name.as_str(), logo.group_id))
        .collect();

    let mut result = JoinResult::default();
    for shot in shots {
        if !known.contains(&(shot.file_name.as_str(), shot.group_id)) {
            result.orphan_shots += 1;
            continue;
        }

        let period = normalize_period(&shot.period, config);
        result
            .stats
            .entry(shot.key())
            .or_default()
            .record(&period, shot.duration_ms, shot.screen_percentage);
        result.periods.insert(period);
    }

    if result.orphan_shots > 0 {
        log::debug!(
            "Discarded {} of {} shots without a tracked logo",
            result.orphan_shots,
            shots.len()
        );
    }

    result
}
