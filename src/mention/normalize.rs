//! Compound tag normalization
//!
//! GENIA marks coordinated mentions such as "alpha- and beta-globin" with a
//! compound tag listing the subtype of every conjunct:
//!
//! ```text
//! (AND G#DNA_domain_or_region G#DNA_domain_or_region)
//! (OR G#protein_molecule G#protein_molecule)
//! ```
//!
//! The normalizer keeps only the first listed subtype (the second
//! whitespace token of the tag). This is a policy, not a parser: it relies on
//! the corpus convention that all conjuncts of one compound mention belong to
//! the same canonical family. Tags that break the convention are still
//! reduced to their first subtype, with a warning.

use super::labels::LabelGeneralizer;
use crate::errors::{CorpusError, Result};
use crate::types::RawMention;
use tracing::warn;

/// Marker opening a conjunction group
pub const AND_MARKER: &str = "(AND";
/// Marker opening a disjunction group
pub const OR_MARKER: &str = "(OR";

/// Rewrites compound tags to a single representative subtype
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeNormalizer {
    labels: LabelGeneralizer,
}

impl TypeNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `subtype` is a compound tag
    pub fn is_compound(subtype: &str) -> bool {
        subtype.contains(AND_MARKER) || subtype.contains(OR_MARKER)
    }

    /// Representative subtype for `subtype`.
    ///
    /// Plain subtypes are returned unchanged. Compound tags yield their second
    /// whitespace token; a compound tag with fewer than two tokens is an error.
    pub fn normalize(&self, subtype: &str) -> Result<String> {
        if !Self::is_compound(subtype) {
            return Ok(subtype.to_string());
        }

        let parts: Vec<&str> = subtype.split_whitespace().collect();
        let representative = match parts.get(1) {
            Some(part) => *part,
            None => {
                return Err(CorpusError::compound_tag(
                    subtype,
                    "expected a group marker followed by at least one subtype",
                ))
            }
        };

        self.warn_on_disagreement(subtype, &parts[1..], representative);
        Ok(representative.to_string())
    }

    /// Copy of `mention` with its subtype normalized
    pub fn normalize_mention(&self, mention: &RawMention) -> Result<RawMention> {
        Ok(RawMention::new(
            self.normalize(&mention.subtype)?,
            mention.text.clone(),
        ))
    }

    fn warn_on_disagreement(&self, tag: &str, members: &[&str], representative: &str) {
        let chosen = self.labels.labels_for(representative);
        let disagreeing = members
            .iter()
            .map(|m| m.trim_matches(|c: char| c == '(' || c == ')'))
            .filter(|m| !m.is_empty() && *m != "AND" && *m != "OR")
            .find(|m| self.labels.labels_for(m) != chosen);

        if let Some(other) = disagreeing {
            warn!(
                tag,
                representative,
                conflicting = other,
                "compound tag members map to different canonical labels; keeping the first"
            );
        }
    }
}
