//! Answer validation.
//!
//! Every aligned mention passes through the [`AnswerValidator`] before it
//! becomes an [`Answer`]. The validator runs all registered
//! [`AnswerRule`]s and collects every diagnostic into a
//! [`ValidationReport`]; [`AnswerValidator::require`] turns a report with
//! any diagnostic into a hard error. A mention whose text could not be
//! located (unset position) is always rejected, never coerced to a nearby
//! span.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use genia_mrc::pipeline::validation::AnswerValidator;
//!
//! let validator = AnswerValidator::with_defaults();
//! let answer = validator.require(&located_mention, &tokens)?;
//! ```

use serde::Serialize;

use super::error_code::ErrorCode;
use crate::errors::{CorpusError, Result};
use crate::nlp::tokenizer::Tokenizer;
use crate::types::{Answer, CanonicalMention};

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single reason an answer is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerDiagnostic {
    /// Stable error code for programmatic matching.
    pub code: ErrorCode,

    /// Output field the problem is attached to (`"text"`, `"start_pos"`, ...).
    pub field: &'static str,

    /// Human-readable description of the problem.
    pub message: String,
}

impl AnswerDiagnostic {
    pub fn new(code: ErrorCode, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            field,
            message: message.into(),
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules on one answer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<AnswerDiagnostic>,
}

impl ValidationReport {
    /// Returns `true` if no rule reported a problem.
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Check whether a diagnostic with `code` was reported.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// All diagnostics on one line: `[code] field: message; ...`
    pub fn summary(&self) -> String {
        self.diagnostics
            .iter()
            .map(|d| format!("[{}] {}: {}", d.code, d.field, d.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single check on an aligned mention.
///
/// Rules are stateless and `Send + Sync` so one validator can be shared by
/// every worker of the parallel assembler.
pub trait AnswerRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"positions_set"`).
    fn name(&self) -> &str;

    /// Inspect `mention` against the passage `tokens` and return any findings.
    fn check(&self, mention: &CanonicalMention, tokens: &[String]) -> Vec<AnswerDiagnostic>;
}

// ─── Validator ──────────────────────────────────────────────────────────────

/// Runs a set of [`AnswerRule`]s over aligned mentions.
pub struct AnswerValidator {
    rules: Vec<Box<dyn AnswerRule>>,
}

impl AnswerValidator {
    /// Create an empty validator with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator with the default rule set.
    pub fn with_defaults() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(NonEmptyTextRule));
        validator.add_rule(Box::new(PositionsSetRule));
        validator.add_rule(Box::new(SpanBoundsRule));
        validator.add_rule(Box::new(SpanTextRule));
        validator
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn AnswerRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules and return the collected report.
    pub fn validate(&self, mention: &CanonicalMention, tokens: &[String]) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.check(mention, tokens));
        }
        report
    }

    /// Convert `mention` into an [`Answer`], failing on any diagnostic.
    pub fn require(&self, mention: &CanonicalMention, tokens: &[String]) -> Result<Answer> {
        let report = self.validate(mention, tokens);
        match (mention.start_token, mention.end_token) {
            (Some(start_token), Some(end_token)) if report.is_valid() => Ok(Answer {
                label: mention.label,
                text: mention.text.clone(),
                start_token,
                end_token,
            }),
            _ => {
                let message = if report.is_valid() {
                    // custom rule set without a position check
                    "start_token or end_token is unset".to_string()
                } else {
                    report.summary()
                };
                Err(CorpusError::invalid_answer(
                    mention.label.as_str(),
                    &mention.text,
                    message,
                ))
            }
        }
    }
}

impl Default for AnswerValidator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. text must not be blank ──────────────────────────────────────────────

struct NonEmptyTextRule;

impl AnswerRule for NonEmptyTextRule {
    fn name(&self) -> &str {
        "non_empty_text"
    }

    fn check(&self, mention: &CanonicalMention, _tokens: &[String]) -> Vec<AnswerDiagnostic> {
        if mention.text.trim().is_empty() {
            vec![AnswerDiagnostic::new(
                ErrorCode::EmptyText,
                "text",
                "answer text is empty",
            )]
        } else {
            vec![]
        }
    }
}

// ─── 2. both positions resolved ─────────────────────────────────────────────

struct PositionsSetRule;

impl AnswerRule for PositionsSetRule {
    fn name(&self) -> &str {
        "positions_set"
    }

    fn check(&self, mention: &CanonicalMention, _tokens: &[String]) -> Vec<AnswerDiagnostic> {
        let mut out = Vec::new();
        if mention.start_token.is_none() {
            out.push(AnswerDiagnostic::new(
                ErrorCode::UnsetPosition,
                "start_pos",
                "start_token is unset; the text was not found in the passage",
            ));
        }
        if mention.end_token.is_none() {
            out.push(AnswerDiagnostic::new(
                ErrorCode::UnsetPosition,
                "end_pos",
                "end_token is unset; the text was not found in the passage",
            ));
        }
        out
    }
}

// ─── 3. span is non-empty and inside the passage ────────────────────────────

struct SpanBoundsRule;

impl AnswerRule for SpanBoundsRule {
    fn name(&self) -> &str {
        "span_bounds"
    }

    fn check(&self, mention: &CanonicalMention, tokens: &[String]) -> Vec<AnswerDiagnostic> {
        let (start, end) = match (mention.start_token, mention.end_token) {
            (Some(s), Some(e)) => (s, e),
            _ => return vec![],
        };

        let mut out = Vec::new();
        if start >= end {
            out.push(AnswerDiagnostic::new(
                ErrorCode::EmptySpan,
                "end_pos",
                format!("span {start}..{end} covers no tokens"),
            ));
        }
        if end > tokens.len() {
            out.push(AnswerDiagnostic::new(
                ErrorCode::SpanOutOfBounds,
                "end_pos",
                format!("span {start}..{end} exceeds passage of {} tokens", tokens.len()),
            ));
        }
        out
    }
}

// ─── 4. span spells the answer text ─────────────────────────────────────────

struct SpanTextRule;

impl AnswerRule for SpanTextRule {
    fn name(&self) -> &str {
        "span_text"
    }

    fn check(&self, mention: &CanonicalMention, tokens: &[String]) -> Vec<AnswerDiagnostic> {
        let (start, end) = match (mention.start_token, mention.end_token) {
            (Some(s), Some(e)) if s < e && e <= tokens.len() => (s, e),
            // reported by the bounds rule
            _ => return vec![],
        };

        let found = Tokenizer::new().join(&tokens[start..end]);
        if found != mention.text {
            vec![AnswerDiagnostic::new(
                ErrorCode::SpanTextMismatch,
                "text",
                format!("span {start}..{end} reads '{found}', expected '{}'", mention.text),
            )]
        } else {
            vec![]
        }
    }
}
