//! Report building services.
//!
//! The services run in data-flow order:
//!
//! - [`joiner`]: shots → per-logo statistics
//! - [`sponsors`]: per-logo statistics → sponsor/placement buckets
//! - [`game_table`]: sponsor buckets → per-game report table
//! - [`aggregate_table`]: per-game tables → cross-game placement averages

pub mod aggregate_table;
pub mod game_table;
pub mod joiner;
pub mod sponsors;

#[cfg(test)]
mod aggregate_table_tests;

pub use aggregate_table::{build_aggregate_table, PlacementAccumulator, PlacementSample};
pub use game_table::build_game_table;
pub use joiner::{join_shots, JoinResult};
pub use sponsors::{aggregate_sponsors, SponsorStatsTable};
