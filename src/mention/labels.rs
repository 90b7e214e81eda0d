//! Generalization of GENIA subtypes to canonical labels
//!
//! A subtype is matched against the five canonical labels by substring
//! containment, so `G#DNA_domain_or_region` becomes `DNA` and
//! `G#protein_family_or_group` becomes `protein`. A subtype matching no label
//! is out of scope for the dataset and produces nothing; a subtype matching
//! several labels produces one mention per label.

use crate::types::{CanonicalLabel, CanonicalMention, RawMention};

/// Maps subtypes onto the canonical label set
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelGeneralizer;

impl LabelGeneralizer {
    pub fn new() -> Self {
        Self
    }

    /// Every canonical label contained in `subtype`, in label order
    pub fn labels_for(&self, subtype: &str) -> Vec<CanonicalLabel> {
        CanonicalLabel::ALL
            .into_iter()
            .filter(|label| subtype.contains(label.as_str()))
            .collect()
    }

    /// One positionless mention per matching label (possibly none).
    ///
    /// `mention.subtype` is expected to be normalized already.
    pub fn generalize(&self, mention: &RawMention) -> Vec<CanonicalMention> {
        self.labels_for(&mention.subtype)
            .into_iter()
            .map(|label| CanonicalMention::new(label, mention.text.clone()))
            .collect()
    }

    /// Generalize a sentence's mentions, keeping document order
    pub fn generalize_all(&self, mentions: &[RawMention]) -> Vec<CanonicalMention> {
        mentions.iter().flat_map(|m| self.generalize(m)).collect()
    }
}
