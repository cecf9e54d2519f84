use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::thread;

use crate::config::ReportConfig;
use crate::core::domain::GameDocument;
use crate::core::table::{report_file_stem, AggregateReportTable, GameReportTable, SheetView};
use crate::error::{ReportError, ReportResult};
use crate::io::loaders::InputBatch;
use crate::normalization::{normalize_period, PeriodOrdering};
use crate::services::aggregate_table::build_aggregate_table;
use crate::services::game_table::build_game_table;
use crate::services::joiner::join_shots;
use crate::services::sponsors::{aggregate_sponsors, SponsorStatsTable};

/// Which period columns the report should carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodSelection {
    /// Every period seen in the batch, in configured order
    Observed,
    /// A caller-chosen list, normalized and deduplicated, kept in the given order
    Explicit(Vec<String>),
}

/// Options for a single generate call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub periods: PeriodSelection,
    pub aggregate: bool,
}

impl Default for ReportRequest {
    fn default() -> Self {
        Self {
            periods: PeriodSelection::Observed,
            aggregate: false,
        }
    }
}

/// Output of a generate call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBundle {
    pub periods: Vec<String>,
    pub games: Vec<GameReportTable>,
    pub aggregate: Option<AggregateReportTable>,
    /// Inputs skipped while loading the batch
    pub warnings: Vec<String>,
}

impl ReportBundle {
    pub fn game_ids(&self) -> Vec<&str> {
        self.games.iter().map(|g| g.game_id.as_str()).collect()
    }

    /// Suggested output file stem, e.g. `G1_G2_Aggregate`.
    pub fn file_stem(&self) -> String {
        report_file_stem(&self.game_ids(), self.aggregate.is_some())
    }

    /// Sheets in workbook order: the aggregate first when present, then one
    /// sheet per game.
    pub fn sheets(&self) -> Vec<SheetView> {
        self.aggregate
            .iter()
            .map(SheetView::from)
            .chain(self.games.iter().map(SheetView::from))
            .collect()
    }
}

/// Per-game statistics computed before period columns are known
#[derive(Debug, Clone)]
struct GameStats {
    game_id: String,
    sponsors: SponsorStatsTable,
    periods: BTreeSet<String>,
}

/// Main report pipeline.
///
/// Runs join → sponsor aggregation for every document (optionally on
/// several threads), resolves the period columns, renders one table per
/// game and finally the cross-game aggregate.
pub struct ReportGenerator {
    config: ReportConfig,
    parallelism: NonZeroUsize,
}

impl ReportGenerator {
    /// Create a sequential generator
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            parallelism: NonZeroUsize::MIN,
        }
    }

    /// Process documents on up to `workers` threads. `0` means the number of
    /// available CPUs.
    pub fn with_parallelism(mut self, workers: usize) -> Self {
        self.parallelism = match NonZeroUsize::new(workers) {
            Some(n) => n,
            None => thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        };
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Generate reports for a loaded batch, carrying its load warnings.
    ///
    /// When nothing in the batch could be loaded, the `EmptySelection`
    /// error lists every load warning.
    pub fn generate_batch(
        &self,
        batch: &InputBatch,
        request: &ReportRequest,
    ) -> ReportResult<ReportBundle> {
        if batch.documents.is_empty() && !batch.warnings.is_empty() {
            let reasons: Vec<String> = batch.warnings.iter().map(|w| w.message()).collect();
            return Err(ReportError::EmptySelection(format!(
                "no game documents could be loaded: {}",
                reasons.join("; ")
            )));
        }

        let mut bundle = self.generate(&batch.documents, request)?;
        bundle.warnings = batch.warnings.iter().map(|w| w.message()).collect();
        Ok(bundle)
    }

    /// Generate per-game tables and, if requested, the aggregate.
    ///
    /// # Errors
    /// * `ReportError::EmptySelection` when there are no documents or the
    ///   explicit period list is empty; no work is done in that case
    pub fn generate(
        &self,
        documents: &[GameDocument],
        request: &ReportRequest,
    ) -> ReportResult<ReportBundle> {
        self.check_selection(documents, request)?;

        let stats = self.compute_game_stats(documents);
        let periods = self.resolve_periods(&stats, &request.periods);

        let games: Vec<GameReportTable> = stats
            .iter()
            .map(|game| build_game_table(&game.game_id, &game.sponsors, &periods))
            .collect();

        let aggregate = if request.aggregate {
            Some(build_aggregate_table(&games, &periods)?)
        } else {
            None
        };

        log::info!(
            "Built {} game table(s) over {} period column(s){}",
            games.len(),
            periods.len(),
            if aggregate.is_some() {
                " with aggregate"
            } else {
                ""
            }
        );

        Ok(ReportBundle {
            periods,
            games,
            aggregate,
            warnings: Vec::new(),
        })
    }

    /// Every normalized period observed across `documents`, sorted with the
    /// configured ordering. Intended for offering a selection list.
    pub fn observed_periods(&self, documents: &[GameDocument]) -> Vec<String> {
        let stats = self.compute_game_stats(documents);
        self.resolve_periods(&stats, &PeriodSelection::Observed)
    }

    fn check_selection(
        &self,
        documents: &[GameDocument],
        request: &ReportRequest,
    ) -> ReportResult<()> {
        if documents.is_empty() {
            return Err(ReportError::EmptySelection(
                "no game documents were provided".to_string(),
            ));
        }
        if let PeriodSelection::Explicit(periods) = &request.periods {
            if periods.iter().all(|p| p.trim().is_empty()) {
                return Err(ReportError::EmptySelection(
                    "no periods were selected".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn resolve_periods(&self, stats: &[GameStats], selection: &PeriodSelection) -> Vec<String> {
        match selection {
            PeriodSelection::Observed => {
                let union: BTreeSet<&String> = stats.iter().flat_map(|g| g.periods.iter()).collect();
                let mut periods: Vec<String> = union.into_iter().cloned().collect();
                self.config.period_order.sort(&mut periods);
                periods
            }
            PeriodSelection::Explicit(requested) => {
                let mut seen = BTreeSet::new();
                requested
                    .iter()
                    .filter(|p| !p.trim().is_empty())
                    .map(|p| normalize_period(p, &self.config.labels))
                    .filter(|p| seen.insert(p.clone()))
                    .collect()
            }
        }
    }

    fn compute_game_stats(&self, documents: &[GameDocument]) -> Vec<GameStats> {
        let workers = self.parallelism.get().min(documents.len());
        if workers <= 1 {
            return documents.iter().map(|doc| self.process_document(doc)).collect();
        }

        let chunk_size = documents.len().div_ceil(workers);
        thread::scope(|scope| {
            let handles: Vec<_> = documents
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|doc| self.process_document(doc))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        })
    }

    fn process_document(&self, document: &GameDocument) -> GameStats {
        let labels = &self.config.labels;
        let joined = join_shots(&document.logos, &document.shots, labels);
        let sponsors = aggregate_sponsors(&document.logos, &joined, labels);

        log::debug!(
            "Game {}: {} joined shot(s), {} orphan(s), {} sponsor bucket(s)",
            document.game_id(),
            joined.joined_shots(),
            joined.orphan_shots,
            sponsors.len()
        );

        GameStats {
            game_id: document.game_id().to_string(),
            sponsors,
            periods: joined.periods,
        }
    }
}
