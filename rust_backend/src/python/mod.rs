//! Python bindings for the Streamlit front end.
//!
//! Built only with the `python` feature. The front end keeps file upload
//! and spreadsheet writing; it hands raw JSON documents to
//! `generate_report_json` and renders the sheets it gets back.
//!
//! ```python
//! import exposure_report
//! bundle = json.loads(exposure_report.generate_report_json(docs, aggregate=True))
//! for sheet in bundle["sheets"]:
//!     ...
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use serde::Serialize;

use crate::config::ReportConfig;
use crate::core::table::SheetView;
use crate::error::ReportError;
use crate::io::loaders::{InputBatch, InputLoader};
use crate::report::{PeriodSelection, ReportGenerator, ReportRequest};

#[derive(Serialize)]
struct PyReport {
    file_stem: String,
    periods: Vec<String>,
    sheets: Vec<SheetView>,
    warnings: Vec<String>,
}

fn to_py_err(error: ReportError) -> PyErr {
    match error {
        ReportError::EmptySelection(_) | ReportError::Configuration(_) => {
            PyValueError::new_err(error.to_string())
        }
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

fn load_config(config_path: Option<&str>) -> PyResult<ReportConfig> {
    match config_path {
        Some(path) => ReportConfig::from_file(path).map_err(to_py_err),
        None => ReportConfig::load_default().map_err(to_py_err),
    }
}

/// Generate report sheets from raw JSON documents.
///
/// Args:
///     documents: List of JSON strings, one per game
///     periods: Optional list of period columns; defaults to every observed period
///     aggregate: Whether to add the cross-game "Aggregate" sheet
///     config_path: Optional path to a TOML/JSON alias configuration
///
/// Returns:
///     str: JSON with `file_stem`, `periods`, `sheets` and `warnings`
#[pyfunction]
#[pyo3(signature = (documents, periods=None, aggregate=false, config_path=None))]
pub fn generate_report_json(
    documents: Vec<String>,
    periods: Option<Vec<String>>,
    aggregate: bool,
    config_path: Option<String>,
) -> PyResult<String> {
    let config = load_config(config_path.as_deref())?;

    let mut batch = InputBatch::new();
    for (index, document) in documents.iter().enumerate() {
        let name = format!("document_{}", index + 1);
        batch.extend(InputLoader::load_json_bytes(&name, document.as_bytes()));
    }

    let request = ReportRequest {
        periods: periods.map_or(PeriodSelection::Observed, PeriodSelection::Explicit),
        aggregate,
    };

    let bundle = ReportGenerator::new(config)
        .generate_batch(&batch, &request)
        .map_err(to_py_err)?;

    let report = PyReport {
        file_stem: bundle.file_stem(),
        periods: bundle.periods.clone(),
        sheets: bundle.sheets(),
        warnings: bundle.warnings.clone(),
    };
    serde_json::to_string(&report)
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to serialize report: {}", e)))
}

/// Canonicalize a period label with the configured aliases.
#[pyfunction]
#[pyo3(signature = (raw, config_path=None))]
pub fn normalize_period(raw: &str, config_path: Option<String>) -> PyResult<String> {
    let config = load_config(config_path.as_deref())?;
    Ok(crate::normalization::normalize_period(raw, &config.labels))
}

/// Format milliseconds as `HH:MM:SS` (empty for zero).
#[pyfunction]
pub fn ms_to_hhmmss(ms: f64) -> String {
    crate::time::duration::ms_to_hhmmss(ms)
}

#[pymodule]
fn exposure_report(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate_report_json, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_period, m)?)?;
    m.add_function(wrap_pyfunction!(ms_to_hhmmss, m)?)?;
    Ok(())
}
