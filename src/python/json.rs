//! JSON interface for corpus conversion
//!
//! The whole corpus crosses the Python↔Rust boundary as one JSON string
//! and the dataset comes back the same way.

use crate::corpus::{ArticleFailure, CorpusAssembler};
use crate::document::Article;
use crate::errors::{CorpusError, Result};
use crate::types::{CorpusConfig, DatasetBundle};
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Input corpus from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct JsonCorpusRequest {
    pub articles: Vec<Article>,
    #[serde(default)]
    pub config: Option<CorpusConfig>,
}

/// One skipped article
#[derive(Debug, Clone, Serialize)]
pub struct JsonFailure {
    pub article_id: String,
    pub error: String,
}

impl From<ArticleFailure> for JsonFailure {
    fn from(failure: ArticleFailure) -> Self {
        JsonFailure {
            article_id: failure.article_id,
            error: failure.error.to_string(),
        }
    }
}

/// Output of a partial build
#[derive(Debug, Clone, Serialize)]
pub struct JsonPartialResult {
    pub dataset: DatasetBundle,
    pub failures: Vec<JsonFailure>,
}

fn parse_request(json_input: &str) -> Result<(Vec<Article>, CorpusAssembler)> {
    let request: JsonCorpusRequest = serde_json::from_str(json_input)
        .map_err(|e| CorpusError::serialization(format!("Invalid JSON: {}", e)))?;
    let assembler = CorpusAssembler::new(request.config.unwrap_or_default())?;
    Ok((request.articles, assembler))
}

pub(crate) fn build_dataset(json_input: &str) -> Result<String> {
    let (articles, assembler) = parse_request(json_input)?;
    assembler.assemble(&articles)?.to_json()
}

pub(crate) fn build_partial(json_input: &str) -> Result<String> {
    let (articles, assembler) = parse_request(json_input)?;
    let (dataset, failures) = assembler.assemble_partial(&articles)?;
    let result = JsonPartialResult {
        dataset,
        failures: failures.into_iter().map(JsonFailure::from).collect(),
    };
    Ok(serde_json::to_string(&result)?)
}

pub(crate) fn corpus_stats(json_input: &str) -> Result<String> {
    let bundle = DatasetBundle::from_json(json_input)?;
    Ok(serde_json::to_string(&bundle.stats())?)
}

fn to_py_err(err: CorpusError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Convert a corpus to the MRC span dataset
///
/// Args:
///     json_input: JSON string `{"articles": [...], "config": {...}}`
///
/// Returns:
///     JSON string `{"built_time", "version", "data": [...]}`
#[pyfunction]
#[pyo3(signature = (json_input))]
pub fn build_dataset_from_json(json_input: &str) -> PyResult<String> {
    build_dataset(json_input).map_err(to_py_err)
}

/// Convert every article that converts cleanly and list the others
///
/// Args:
///     json_input: JSON string `{"articles": [...], "config": {...}}`
///
/// Returns:
///     JSON string `{"dataset": {...}, "failures": [{"article_id", "error"}]}`
#[pyfunction]
#[pyo3(signature = (json_input))]
pub fn build_partial_from_json(json_input: &str) -> PyResult<String> {
    build_partial(json_input).map_err(to_py_err)
}

/// Count sentences, tokens and entities of a converted dataset
#[pyfunction]
#[pyo3(signature = (json_input))]
pub fn corpus_stats_from_json(json_input: &str) -> PyResult<String> {
    corpus_stats(json_input).map_err(to_py_err)
}
