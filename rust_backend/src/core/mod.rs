//! Core domain models for sponsorship exposure reporting.
//!
//! This module defines the fundamental data structures used throughout the
//! engine: input records, accumulated statistics, and report tables.

pub mod domain;
pub mod table;

pub use domain::{
    ExposureStats, GameDocument, GameInfo, IdentityStats, LogoKey, LogoRecord, ShotRecord,
    SponsorKey, SponsorStats,
};
pub use table::{
    AggregateReportRow, AggregateReportTable, GameReportRow, GameReportTable, SheetView,
};
