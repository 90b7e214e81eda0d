//! Read-only corpus statistics over an assembled bundle.

use crate::types::{CanonicalLabel, DatasetBundle, SentenceRecord};
use serde::Serialize;
use std::fmt;

/// Counts over a set of sentence records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub n_sentences: usize,
    /// Whitespace tokens across all passages
    pub n_tokens: usize,
    pub n_entities: usize,
    #[serde(rename = "n_DNA")]
    pub n_dna: usize,
    #[serde(rename = "n_RNA")]
    pub n_rna: usize,
    pub n_protein: usize,
    pub n_cell_line: usize,
    pub n_cell_type: usize,
}

impl CorpusStats {
    pub fn from_records(records: &[SentenceRecord]) -> Self {
        let mut stats = Self {
            n_sentences: records.len(),
            ..Self::default()
        };
        for record in records {
            stats.n_tokens += record.tokens().len();
            stats.n_entities += record.answers.len();
            for answer in &record.answers {
                *stats.count_mut(answer.label) += 1;
            }
        }
        stats
    }

    /// Answers carrying `label`
    pub fn count(&self, label: CanonicalLabel) -> usize {
        match label {
            CanonicalLabel::Dna => self.n_dna,
            CanonicalLabel::Rna => self.n_rna,
            CanonicalLabel::Protein => self.n_protein,
            CanonicalLabel::CellLine => self.n_cell_line,
            CanonicalLabel::CellType => self.n_cell_type,
        }
    }

    fn count_mut(&mut self, label: CanonicalLabel) -> &mut usize {
        match label {
            CanonicalLabel::Dna => &mut self.n_dna,
            CanonicalLabel::Rna => &mut self.n_rna,
            CanonicalLabel::Protein => &mut self.n_protein,
            CanonicalLabel::CellLine => &mut self.n_cell_line,
            CanonicalLabel::CellType => &mut self.n_cell_type,
        }
    }
}

impl fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sentences: {}", self.n_sentences)?;
        writeln!(f, "tokens:    {}", self.n_tokens)?;
        write!(f, "entities:  {}", self.n_entities)?;
        for label in CanonicalLabel::ALL {
            write!(f, "\n  {:<10} {}", label.as_str(), self.count(label))?;
        }
        Ok(())
    }
}

impl DatasetBundle {
    /// Statistics over every record in the bundle
    pub fn stats(&self) -> CorpusStats {
        CorpusStats::from_records(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Answer;

    fn answer(label: CanonicalLabel, text: &str, start: usize, end: usize) -> Answer {
        Answer {
            label,
            text: text.to_string(),
            start_token: start,
            end_token: end,
        }
    }

    fn bundle() -> DatasetBundle {
        DatasetBundle::new(
            "2021/06/01-12:00:00",
            "GENIAcorpus3.02p",
            vec![
                SentenceRecord {
                    id: "M-title-0".to_string(),
                    passage: "IL-2 gene expression".to_string(),
                    answers: vec![
                        answer(CanonicalLabel::Dna, "IL-2 gene", 0, 2),
                        answer(CanonicalLabel::Protein, "IL-2", 0, 1),
                    ],
                },
                SentenceRecord {
                    id: "M-abstract-1".to_string(),
                    passage: "in human T cells".to_string(),
                    answers: vec![answer(CanonicalLabel::CellType, "human T cells", 1, 4)],
                },
            ],
        )
    }

    #[test]
    fn test_counts() {
        let stats = bundle().stats();
        assert_eq!(stats.n_sentences, 2);
        assert_eq!(stats.n_tokens, 7);
        assert_eq!(stats.n_entities, 3);
        assert_eq!(stats.count(CanonicalLabel::Dna), 1);
        assert_eq!(stats.count(CanonicalLabel::Protein), 1);
        assert_eq!(stats.count(CanonicalLabel::CellType), 1);
        assert_eq!(stats.count(CanonicalLabel::Rna), 0);
        let per_label: usize = CanonicalLabel::ALL.iter().map(|l| stats.count(*l)).sum();
        assert_eq!(per_label, stats.n_entities);
    }

    #[test]
    fn test_empty() {
        assert_eq!(CorpusStats::from_records(&[]), CorpusStats::default());
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(bundle().stats()).unwrap();
        assert_eq!(value["n_DNA"], 1);
        assert_eq!(value["n_cell_type"], 1);
        assert_eq!(value["n_sentences"], 2);
    }

    #[test]
    fn test_display() {
        let shown = bundle().stats().to_string();
        assert!(shown.starts_with("sentences: 2\n"));
        assert!(shown.contains("cell_type"));
    }
}
