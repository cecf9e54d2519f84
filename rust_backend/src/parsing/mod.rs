//! Parsers for per-game exposure telemetry.
//!
//! # Parsers
//!
//! - [`json_parser`]: Parse one game document (`GameInfo`, `Logos`, `Shots`)
//!
//! # Example
//!
//! ```no_run
//! use exposure_report::parsing::json_parser::parse_game_document;
//! use std::path::Path;
//!
//! let game = parse_game_document(Path::new("game.json"))
//!     .expect("Failed to parse game");
//! println!("{} logos, {} shots", game.logos.len(), game.shots.len());
//! ```

pub mod json_parser;


pub use json_parser::{parse_game_document, parse_game_document_slice, parse_game_document_str};
