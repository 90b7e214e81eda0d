//! Python bindings via PyO3
//!
//! This module provides the Python interface for genia_mrc.

pub mod json;

use pyo3::prelude::*;

/// Register all Python functions
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("CORPUS_VERSION", crate::types::DEFAULT_VERSION)?;

    // JSON interface functions
    m.add_function(wrap_pyfunction!(json::build_dataset_from_json, m)?)?;
    m.add_function(wrap_pyfunction!(json::build_partial_from_json, m)?)?;
    m.add_function(wrap_pyfunction!(json::corpus_stats_from_json, m)?)?;

    Ok(())
}
