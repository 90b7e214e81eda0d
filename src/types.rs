//! Core types for genia_mrc
//!
//! This module defines the data structures flowing through the conversion:
//! canonical labels, the transient mention types, the durable answer and
//! sentence records, the dataset bundle, and configuration.

use crate::errors::{CorpusError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Canonical Label
// ============================================================================

/// One of the five collapsed entity categories kept in the dataset.
///
/// All DNA subtypes collapse into `DNA`, all RNA subtypes into `RNA`, all
/// protein subtypes into `protein`; cell lines and cell types are kept; every
/// other GENIA category is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalLabel {
    #[serde(rename = "DNA")]
    Dna,
    #[serde(rename = "RNA")]
    Rna,
    #[serde(rename = "protein")]
    Protein,
    #[serde(rename = "cell_line")]
    CellLine,
    #[serde(rename = "cell_type")]
    CellType,
}

impl CanonicalLabel {
    /// The fixed label set, in matching order
    pub const ALL: [CanonicalLabel; 5] = [
        CanonicalLabel::Dna,
        CanonicalLabel::Rna,
        CanonicalLabel::Protein,
        CanonicalLabel::CellLine,
        CanonicalLabel::CellType,
    ];

    /// The label string as written to the dataset
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalLabel::Dna => "DNA",
            CanonicalLabel::Rna => "RNA",
            CanonicalLabel::Protein => "protein",
            CanonicalLabel::CellLine => "cell_line",
            CanonicalLabel::CellType => "cell_type",
        }
    }

    /// Position of this label in [`CanonicalLabel::ALL`]
    pub fn index(&self) -> usize {
        match self {
            CanonicalLabel::Dna => 0,
            CanonicalLabel::Rna => 1,
            CanonicalLabel::Protein => 2,
            CanonicalLabel::CellLine => 3,
            CanonicalLabel::CellType => 4,
        }
    }

    /// Parse a label string as written to the dataset
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == value)
    }
}

impl fmt::Display for CanonicalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Section
// ============================================================================

/// The part of an article a sentence was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Title,
    Abstract,
}

impl Section {
    /// Sections in the order they are read from an article
    pub const ORDER: [Section; 2] = [Section::Title, Section::Abstract];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Title => "title",
            Section::Abstract => "abstract",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Mentions
// ============================================================================

/// A mention as it appears in the markup, before any type rewriting.
///
/// `text` has been re-tokenized on whitespace and joined with single spaces,
/// so its token boundaries line up with the sentence tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMention {
    /// The `sem` attribute; a single subtype or a compound tag
    pub subtype: String,
    /// Surface form of the mention
    pub text: String,
}

impl RawMention {
    pub fn new(subtype: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            subtype: subtype.into(),
            text: text.into(),
        }
    }
}

/// A mention carrying a canonical label, with optional token positions.
///
/// Positions are unset until the span aligner runs; an unset position after
/// alignment means the text could not be located in the passage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalMention {
    pub label: CanonicalLabel,
    pub text: String,
    /// Start token index (inclusive)
    pub start_token: Option<usize>,
    /// End token index (exclusive)
    pub end_token: Option<usize>,
}

impl CanonicalMention {
    /// Create a positionless mention
    pub fn new(label: CanonicalLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
            start_token: None,
            end_token: None,
        }
    }

    /// Copy of this mention with the given span (or no span at all)
    pub fn located(&self, span: Option<(usize, usize)>) -> Self {
        Self {
            label: self.label,
            text: self.text.clone(),
            start_token: span.map(|(start, _)| start),
            end_token: span.map(|(_, end)| end),
        }
    }
}

// ============================================================================
// Answer & Sentence Record
// ============================================================================

/// A validated, positioned mention.
///
/// Invariant (enforced by the answer validator): `start_token < end_token`,
/// `end_token <= passage token count`, and the passage tokens in
/// `start_token..end_token` joined with single spaces equal `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "type")]
    pub label: CanonicalLabel,
    pub text: String,
    /// Start token index (inclusive)
    #[serde(rename = "start_pos")]
    pub start_token: usize,
    /// End token index (exclusive)
    #[serde(rename = "end_pos")]
    pub end_token: usize,
}

impl Answer {
    /// Number of tokens covered by this answer
    pub fn token_len(&self) -> usize {
        self.end_token - self.start_token
    }

    /// Published ordering of answers within a record:
    /// start ascending, then end ascending, then label string ascending.
    pub fn span_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start_token
            .cmp(&other.start_token)
            .then(self.end_token.cmp(&other.end_token))
            .then_with(|| self.label.as_str().cmp(other.label.as_str()))
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.label, self.text, self.start_token, self.end_token
        )
    }
}

/// One dataset sample: a sentence and every answer located in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// `"{article_id}-{section}-{sentence_index}"`
    #[serde(rename = "pid")]
    pub id: String,
    /// Whitespace-tokenized sentence joined with single spaces
    pub passage: String,
    /// Sorted by [`Answer::span_cmp`]
    pub answers: Vec<Answer>,
}

impl SentenceRecord {
    /// Number of answers in this record
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Passage tokens
    pub fn tokens(&self) -> Vec<&str> {
        self.passage.split_whitespace().collect()
    }
}

// ============================================================================
// Dataset Bundle
// ============================================================================

/// The complete converted dataset with build metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetBundle {
    pub built_time: String,
    pub version: String,
    #[serde(rename = "data")]
    pub records: Vec<SentenceRecord>,
}

impl DatasetBundle {
    pub fn new(
        built_time: impl Into<String>,
        version: impl Into<String>,
        records: Vec<SentenceRecord>,
    ) -> Self {
        Self {
            built_time: built_time.into(),
            version: version.into(),
            records,
        }
    }

    /// Number of sentence records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compact JSON in the published `{built_time, version, data}` layout
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed JSON in the published layout
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a previously serialized bundle
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for DatasetBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[BUILT_TIME]: {}\n[ VERSION ] : {}",
            self.built_time, self.version
        )
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Default dataset version tag
pub const DEFAULT_VERSION: &str = "GENIAcorpus3.02p";

/// `strftime` layout used for `built_time` when none is configured
pub const BUILT_TIME_FORMAT: &str = "%Y/%m/%d-%H:%M:%S";

/// What the assembler does when an article fails to convert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the build and return the error
    #[default]
    Abort,
    /// Leave the article out of the bundle, log it, and keep going
    SkipArticle,
}

/// Configuration for dataset assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Version tag written to the bundle
    #[serde(default = "default_version")]
    pub version: String,
    /// Fixed build timestamp; the current local time is used when unset
    #[serde(default)]
    pub built_time: Option<String>,
    /// Convert articles on the Rayon pool
    #[serde(default)]
    pub parallel: bool,
    /// Thread limit for the parallel path (None = Rayon default)
    #[serde(default)]
    pub max_threads: Option<usize>,
    /// Number of leading articles whose sentences are logged at debug level
    #[serde(default = "default_debug_articles")]
    pub debug_articles: usize,
    /// Behaviour on a failed article
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_debug_articles() -> usize {
    1
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            built_time: None,
            parallel: false,
            max_threads: None,
            debug_articles: default_debug_articles(),
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl CorpusConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(CorpusError::invalid_config("version must not be empty"));
        }

        if let Some(built_time) = &self.built_time {
            if built_time.trim().is_empty() {
                return Err(CorpusError::invalid_config(
                    "built_time must not be empty when set",
                ));
            }
        }

        if self.max_threads == Some(0) {
            return Err(CorpusError::invalid_config("max_threads must be > 0"));
        }

        Ok(())
    }

    /// The configured build time, or now in [`BUILT_TIME_FORMAT`]
    pub fn resolved_built_time(&self) -> String {
        match &self.built_time {
            Some(t) => t.clone(),
            None => chrono::Local::now().format(BUILT_TIME_FORMAT).to_string(),
        }
    }

    /// Execute `f` inside a Rayon pool limited to `max_threads`.
    ///
    /// Without a limit, `f` runs directly on the global pool.
    pub fn scoped<R: Send>(&self, f: impl FnOnce() -> R + Send) -> Result<R> {
        match self.max_threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| CorpusError::invalid_config(e.to_string()))?;
                Ok(pool.install(f))
            }
            None => Ok(f()),
        }
    }

    /// Builder method: set version tag
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Builder method: pin the build time
    pub fn with_built_time(mut self, built_time: impl Into<String>) -> Self {
        self.built_time = Some(built_time.into());
        self
    }

    /// Builder method: enable or disable the parallel article path
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builder method: limit the parallel path's thread count
    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = Some(max_threads);
        self
    }

    /// Builder method: set how many leading articles are debug-logged
    pub fn with_debug_articles(mut self, count: usize) -> Self {
        self.debug_articles = count;
        self
    }

    /// Builder method: set failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_strings() {
        let labels: Vec<&str> = CanonicalLabel::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(labels, vec!["DNA", "RNA", "protein", "cell_line", "cell_type"]);
        for (i, label) in CanonicalLabel::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
            assert_eq!(CanonicalLabel::from_label(label.as_str()), Some(*label));
        }
        assert_eq!(CanonicalLabel::from_label("G#DNA"), None);
    }

    #[test]
    fn test_label_serde() {
        let json = serde_json::to_string(&CanonicalLabel::CellLine).unwrap();
        assert_eq!(json, "\"cell_line\"");
        let back: CanonicalLabel = serde_json::from_str("\"DNA\"").unwrap();
        assert_eq!(back, CanonicalLabel::Dna);
    }

    #[test]
    fn test_answer_json_layout() {
        let answer = Answer {
            label: CanonicalLabel::Protein,
            text: "IL-2".to_string(),
            start_token: 3,
            end_token: 4,
        };
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(value["type"], "protein");
        assert_eq!(value["text"], "IL-2");
        assert_eq!(value["start_pos"], 3);
        assert_eq!(value["end_pos"], 4);
        assert_eq!(answer.to_string(), "(protein, IL-2, 3, 4)");
    }

    #[test]
    fn test_span_cmp_uses_label_string() {
        // "DNA" < "cell_type" < "protein" as strings, unlike declaration order
        let make = |label| Answer {
            label,
            text: "x".to_string(),
            start_token: 0,
            end_token: 1,
        };
        let mut answers = vec![
            make(CanonicalLabel::Protein),
            make(CanonicalLabel::CellType),
            make(CanonicalLabel::Dna),
        ];
        answers.sort_by(Answer::span_cmp);
        let labels: Vec<_> = answers.iter().map(|a| a.label).collect();
        assert_eq!(
            labels,
            vec![CanonicalLabel::Dna, CanonicalLabel::CellType, CanonicalLabel::Protein]
        );
    }

    #[test]
    fn test_located_copies() {
        let mention = CanonicalMention::new(CanonicalLabel::Dna, "band 3");
        let placed = mention.located(Some((4, 6)));
        assert_eq!(placed.start_token, Some(4));
        assert_eq!(placed.end_token, Some(6));
        assert_eq!(mention.start_token, None);

        let missing = mention.located(None);
        assert_eq!(missing.start_token, None);
        assert_eq!(missing.end_token, None);
    }

    #[test]
    fn test_bundle_json_layout() {
        let bundle = DatasetBundle::new(
            "2021/01/01-00:00:00",
            DEFAULT_VERSION,
            vec![SentenceRecord {
                id: "MEDLINE:1-title-0".to_string(),
                passage: "IL-2 gene".to_string(),
                answers: vec![],
            }],
        );
        let value: serde_json::Value = serde_json::from_str(&bundle.to_json().unwrap()).unwrap();
        assert_eq!(value["version"], DEFAULT_VERSION);
        assert_eq!(value["data"][0]["pid"], "MEDLINE:1-title-0");
        assert!(value["data"][0]["answers"].as_array().unwrap().is_empty());

        let back = DatasetBundle::from_json(&bundle.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, bundle);
    }

    #[test]
    fn test_config_default() {
        let config = CorpusConfig::default();
        assert_eq!(config.version, DEFAULT_VERSION);
        assert!(!config.parallel);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(CorpusConfig::default().with_version("  ").validate().is_err());
        assert!(CorpusConfig::default().with_built_time("").validate().is_err());
        assert!(CorpusConfig::default().with_max_threads(0).validate().is_err());
        assert!(CorpusConfig::default().with_max_threads(2).validate().is_ok());
    }

    #[test]
    fn test_config_from_json_defaults() {
        let config = CorpusConfig::from_json(r#"{"parallel": true}"#).unwrap();
        assert!(config.parallel);
        assert_eq!(config.version, DEFAULT_VERSION);
        assert_eq!(config.debug_articles, 1);

        let config =
            CorpusConfig::from_json(r#"{"failure_policy": "skip_article"}"#).unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::SkipArticle);

        assert!(CorpusConfig::from_json(r#"{"version": ""}"#).is_err());
    }

    #[test]
    fn test_resolved_built_time() {
        let pinned = CorpusConfig::default().with_built_time("2020/05/04-03:02:01");
        assert_eq!(pinned.resolved_built_time(), "2020/05/04-03:02:01");

        let now = CorpusConfig::default().resolved_built_time();
        // e.g. 2024/01/31-12:00:00
        assert_eq!(now.len(), 19);
        assert_eq!(&now[4..5], "/");
        assert_eq!(&now[10..11], "-");
    }

    #[test]
    fn test_scoped_pool() {
        let config = CorpusConfig::default().with_max_threads(1);
        let threads = config.scoped(rayon::current_num_threads).unwrap();
        assert_eq!(threads, 1);
    }
}
