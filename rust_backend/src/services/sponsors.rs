//! Logo identity → sponsor/placement rollup.

use std::collections::HashMap;

use crate::config::LabelConfig;
use crate::core::domain::{LogoKey, LogoRecord, SponsorKey, SponsorStats};
use crate::normalization::{normalize_placement, sponsor_name};
use crate::services::joiner::JoinResult;

/// Sponsor/placement buckets in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SponsorStatsTable {
    entries: Vec<(SponsorKey, SponsorStats)>,
    index: HashMap<SponsorKey, usize>,
}

impl SponsorStatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket for `key`, created empty at the end of the table if missing.
    pub fn bucket_mut(&mut self, key: SponsorKey) -> &mut SponsorStats {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key, SponsorStats::default()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    pub fn get(&self, key: &SponsorKey) -> Option<&SponsorStats> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SponsorKey, &SponsorStats)> {
        self.entries.iter().map(|(key, stats)| (key, stats))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Distinct logo identities in first-appearance order.
///
/// A repeated identity keeps its first position but takes the placement of
/// its last occurrence.
pub fn distinct_logos(logos: &[LogoRecord]) -> Vec<(LogoKey, &str)> {
    let mut order: Vec<(LogoKey, &str)> = Vec::with_capacity(logos.len());
    let mut seen: HashMap<LogoKey, usize> = HashMap::with_capacity(logos.len());
    for logo in logos {
        let key = logo.key();
        match seen.get(&key) {
            Some(&slot) => order[slot].1 = logo.placement.as_str(),
            None => {
                seen.insert(key.clone(), order.len());
                order.push((key, logo.placement.as_str()));
            }
        }
    }
    order
}

/// Collapse per-identity statistics into sponsor/placement buckets.
///
/// Every logo identity produces a bucket, including logos that never
/// appeared on screen; those buckets stay at zero and are filtered out when
/// the game table is built.
pub fn aggregate_sponsors(
    logos: &[LogoRecord],
    joined: &JoinResult,
    config: &LabelConfig,
) -> SponsorStatsTable {
    let mut table = SponsorStatsTable::new();
    for (key, placement) in distinct_logos(logos) {
        let sponsor_key = SponsorKey::new(
            sponsor_name(&key.file_name),
            normalize_placement(placement, config),
        );
        let bucket = table.bucket_mut(sponsor_key);
        if let Some(stats) = joined.get(&key) {
            bucket.merge(stats);
        }
    }
    table
}
