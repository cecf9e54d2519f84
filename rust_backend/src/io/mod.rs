//! High-level input loading utilities.
//!
//! Loaders combine file access, archive extraction and document parsing.
//! They collect bad inputs as warnings instead of failing the batch.
//!
//! # Example
//!
//! ```no_run
//! use exposure_report::io::loaders::InputLoader;
//!
//! let batch = InputLoader::load_paths(&["games/", "playoffs.zip"]);
//! println!("Loaded {} games", batch.documents.len());
//! for warning in &batch.warnings {
//!     eprintln!("{}", warning.message());
//! }
//! ```

pub mod loaders;

#[cfg(test)]
mod loaders_tests;

pub use loaders::{InputBatch, InputLoader, InputSourceType, LoadWarning};
