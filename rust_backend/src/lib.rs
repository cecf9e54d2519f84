//! # Exposure Report Engine
//!
//! Normalization and aggregation engine for sponsorship exposure telemetry.
//!
//! Each game is delivered as a JSON document listing the tracked sponsor
//! logos and every on-screen "shot" of them. This crate turns a batch of
//! such documents into per-game exposure tables (one row per sponsor and
//! placement) and an optional cross-game table averaged per placement.
//!
//! ## Architecture
//!
//! - [`core`]: Input records, accumulated statistics and report tables
//! - [`config`]: Alias maps and period ordering loaded from TOML/JSON
//! - [`normalization`]: Period/placement/sponsor label canonicalization
//! - [`time`]: `HH:MM:SS` duration codec
//! - [`parsing`]: Game document parsing
//! - [`io`]: File, directory and ZIP archive loading
//! - [`services`]: Join, sponsor rollup, game table and aggregate table
//! - [`report`]: End-to-end pipeline with request validation
//!
//! ## Example
//!
//! ```
//! use exposure_report::config::ReportConfig;
//! use exposure_report::parsing::parse_game_document_str;
//! use exposure_report::report::{ReportGenerator, ReportRequest};
//!
//! let json = r#"{
//!     "GameInfo": { "GameId": "G1" },
//!     "Logos": [ { "FileName": "Nike.png", "GroupId": 1, "Placement": "LeftBoard" } ],
//!     "Shots": [ { "FileName": "Nike.png", "GroupId": 1, "Period": "1T",
//!                  "Duration": 2000, "ScreenPercentage": 10 } ]
//! }"#;
//! let game = parse_game_document_str(json, "g1").unwrap();
//!
//! let bundle = ReportGenerator::new(ReportConfig::default())
//!     .generate(&[game], &ReportRequest::default())
//!     .unwrap();
//! assert_eq!(bundle.games[0].rows[0].total_duration, "00:00:02");
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod normalization;
pub mod parsing;
pub mod report;
pub mod services;
pub mod time;

#[cfg(feature = "python")]
pub mod python;

pub use error::{ReportError, ReportResult};
