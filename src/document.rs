//! Parsed document tree handed over by the corpus reader
//!
//! The XML reader itself lives outside this crate. What it hands over is
//! modelled here: articles with a MEDLINE id and title/abstract sections,
//! each section a list of sentences, each sentence an ordered list of text
//! segments and (possibly nested) annotation nodes.
//!
//! The tree deserializes from JSON. A segment is either a plain string or
//! an annotation object:
//!
//! ```json
//! ["Activation of ", {"sem": "G#protein_molecule", "children": ["IL-2"]}, " ."]
//! ```

use crate::errors::{CorpusError, Result};
use crate::types::Section;
use serde::{Deserialize, Serialize};

/// One piece of sentence content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    Text(String),
    Annotation(Annotation),
}

/// An annotation node (`<cons>` in GENIA), which may nest further annotations
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotation {
    /// The `sem` type attribute; absent on some nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sem: Option<String>,
    #[serde(default)]
    pub children: Vec<Segment>,
}

impl Annotation {
    pub fn new(sem: Option<&str>, children: Vec<Segment>) -> Self {
        Self {
            sem: sem.map(str::to_string),
            children,
        }
    }

    /// All text under this node, one piece per text segment, document order
    pub fn text_pieces(&self) -> Vec<&str> {
        let mut pieces = Vec::new();
        collect_text(&self.children, &mut pieces);
        pieces
    }

    /// Text pieces joined with a single space (whitespace not yet normalized)
    pub fn text_content(&self) -> String {
        self.text_pieces().join(" ")
    }
}

/// A sentence node: its content in document order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentenceNode {
    pub segments: Vec<Segment>,
}

impl SentenceNode {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// All text in the sentence, one piece per text segment, document order
    pub fn text_pieces(&self) -> Vec<&str> {
        let mut pieces = Vec::new();
        collect_text(&self.segments, &mut pieces);
        pieces
    }

    /// Text pieces joined with a single space (whitespace not yet normalized)
    pub fn text_content(&self) -> String {
        self.text_pieces().join(" ")
    }

    /// Every annotation node in pre-order, nested ones included
    pub fn annotations(&self) -> Vec<&Annotation> {
        let mut out = Vec::new();
        collect_annotations(&self.segments, &mut out);
        out
    }
}

fn collect_text<'a>(segments: &'a [Segment], out: &mut Vec<&'a str>) {
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push(text),
            Segment::Annotation(node) => collect_text(&node.children, out),
        }
    }
}

fn collect_annotations<'a>(segments: &'a [Segment], out: &mut Vec<&'a Annotation>) {
    for segment in segments {
        if let Segment::Annotation(node) = segment {
            out.push(node);
            collect_annotations(&node.children, out);
        }
    }
}

/// One article of the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// MEDLINE identifier, e.g. `MEDLINE:95280913`
    pub medline_id: String,
    #[serde(default)]
    pub title: Option<Vec<SentenceNode>>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<Vec<SentenceNode>>,
}

impl Article {
    pub fn new(
        medline_id: impl Into<String>,
        title: Vec<SentenceNode>,
        abstract_text: Vec<SentenceNode>,
    ) -> Self {
        Self {
            medline_id: medline_id.into(),
            title: Some(title),
            abstract_text: Some(abstract_text),
        }
    }

    /// Sentences of one section; a missing section is malformed input
    pub fn section(&self, section: Section) -> Result<&[SentenceNode]> {
        let sentences = match section {
            Section::Title => self.title.as_deref(),
            Section::Abstract => self.abstract_text.as_deref(),
        };
        sentences.ok_or_else(|| {
            CorpusError::malformed_input(
                &self.medline_id,
                format!("missing {} section", section),
            )
        })
    }

    /// Check the parts every article must have
    pub fn check(&self) -> Result<()> {
        if self.medline_id.trim().is_empty() {
            return Err(CorpusError::malformed_input(
                &self.medline_id,
                "article has no MEDLINE id",
            ));
        }
        for section in Section::ORDER {
            self.section(section)?;
        }
        Ok(())
    }
}

/// The parsed corpus: articles in document order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Corpus {
    pub articles: Vec<Article>,
}

impl Corpus {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_sentence() -> SentenceNode {
        serde_json::from_str(
            r#"[
                "including",
                {"sem": "(AND G#DNA_domain_or_region G#DNA_domain_or_region)", "children": [
                    {"children": ["alpha-"]},
                    " and ",
                    {"sem": "G#DNA_domain_or_region", "children": ["beta-globin"]}
                ]},
                " ."
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_text_content_joins_pieces() {
        let sentence = nested_sentence();
        assert_eq!(
            sentence.text_pieces(),
            vec!["including", "alpha-", " and ", "beta-globin", " ."]
        );
        assert_eq!(
            sentence.text_content().split_whitespace().collect::<Vec<_>>(),
            vec!["including", "alpha-", "and", "beta-globin", "."]
        );
    }

    #[test]
    fn test_annotations_preorder() {
        let sentence = nested_sentence();
        let nodes = sentence.annotations();
        assert_eq!(nodes.len(), 3);
        assert!(nodes[0].sem.as_deref().unwrap().starts_with("(AND"));
        assert_eq!(nodes[1].sem, None);
        assert_eq!(nodes[2].sem.as_deref(), Some("G#DNA_domain_or_region"));
        assert_eq!(nodes[2].text_content(), "beta-globin");
    }

    #[test]
    fn test_missing_section_is_malformed() {
        let article: Article =
            serde_json::from_str(r#"{"medline_id": "MEDLINE:1", "title": [["x"]]}"#).unwrap();
        assert!(article.section(Section::Title).is_ok());
        let err = article.section(Section::Abstract).unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("abstract"));
        assert!(article.check().is_err());
    }

    #[test]
    fn test_empty_medline_id_is_malformed() {
        let article = Article::new(" ", vec![], vec![]);
        assert!(article.check().unwrap_err().is_malformed_input());
    }

    #[test]
    fn test_corpus_from_json() {
        let corpus = Corpus::from_json(
            r#"{"articles": [{"medline_id": "MEDLINE:1", "title": [], "abstract": []}]}"#,
        )
        .unwrap();
        assert_eq!(corpus.len(), 1);
        assert!(corpus.articles[0].check().is_ok());
        assert!(Corpus::from_json("[").is_err());
    }
}
