//! Property-based tests using proptest

use genia_mrc::*;
use proptest::prelude::*;

/// Small vocabulary so mention text repeats within a sentence
const VOCAB: &[&str] = &["IL-2", "gene", "T", "cells", "the", "of", "NF-kB"];

const SUBTYPES: &[&str] = &[
    "G#protein_molecule",
    "G#DNA_domain_or_region",
    "G#RNA_molecule",
    "G#cell_type",
    "G#cell_line",
    "G#other_name",
    "G#DNA_RNA_hybrid",
    "(AND G#protein_molecule G#protein_molecule)",
];

/// One chunk of a sentence: words, plus an optional annotation subtype and
/// an optional nested annotation over its first word
type Chunk = (Vec<usize>, Option<usize>, Option<usize>);

fn chunk_strategy() -> impl Strategy<Value = Chunk> {
    (
        prop::collection::vec(0..VOCAB.len(), 1..4),
        prop::option::of(0..SUBTYPES.len()),
        prop::option::of(0..SUBTYPES.len()),
    )
}

fn build_sentence(chunks: &[Chunk]) -> SentenceNode {
    let mut segments = Vec::new();
    for (words, sem, nested) in chunks {
        let words: Vec<&str> = words.iter().map(|&w| VOCAB[w]).collect();
        segments.push(Segment::Text(" ".to_string()));
        match sem {
            None => segments.push(Segment::Text(words.join(" "))),
            Some(sem) => {
                let children = match nested {
                    Some(inner) if words.len() > 1 => vec![
                        Segment::Annotation(Annotation::new(
                            Some(SUBTYPES[*inner]),
                            vec![Segment::Text(words[0].to_string())],
                        )),
                        Segment::Text(format!(" {}", words[1..].join(" "))),
                    ],
                    _ => vec![Segment::Text(words.join(" "))],
                };
                segments.push(Segment::Annotation(Annotation::new(
                    Some(SUBTYPES[*sem]),
                    children,
                )));
            }
        }
    }
    SentenceNode::new(segments)
}

fn context(index: usize) -> SentenceContext<'static> {
    SentenceContext {
        article_id: "MEDLINE:1",
        section: Section::Abstract,
        sentence_index: index,
        detailed: false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_answers_match_passage(chunks in prop::collection::vec(chunk_strategy(), 1..8)) {
        let sentence = build_sentence(&chunks);
        let record = SentencePipeline::new().run(context(0), &sentence).unwrap();
        let tokens = record.tokens();

        for answer in &record.answers {
            prop_assert!(answer.start_token < answer.end_token);
            prop_assert!(answer.end_token <= tokens.len());
            prop_assert_eq!(tokens[answer.start_token..answer.end_token].join(" "), answer.text.clone());
        }
    }

    #[test]
    fn test_answers_sorted(chunks in prop::collection::vec(chunk_strategy(), 1..8)) {
        let sentence = build_sentence(&chunks);
        let record = SentencePipeline::new().run(context(0), &sentence).unwrap();

        for pair in record.answers.windows(2) {
            prop_assert_ne!(pair[0].span_cmp(&pair[1]), std::cmp::Ordering::Greater);
        }
    }

    #[test]
    fn test_answer_count_follows_label_fan_out(chunks in prop::collection::vec(chunk_strategy(), 1..8)) {
        let sentence = build_sentence(&chunks);
        let record = SentencePipeline::new().run(context(0), &sentence).unwrap();

        let normalizer = TypeNormalizer::new();
        let generalizer = LabelGeneralizer::new();
        let expected: usize = sentence
            .annotations()
            .iter()
            .filter_map(|a| a.sem.as_deref())
            .map(|sem| generalizer.labels_for(&normalizer.normalize(sem).unwrap()).len())
            .sum();
        prop_assert_eq!(record.answers.len(), expected);
    }

    #[test]
    fn test_passage_is_normalized(chunks in prop::collection::vec(chunk_strategy(), 1..8)) {
        let sentence = build_sentence(&chunks);
        let record = SentencePipeline::new().run(context(3), &sentence).unwrap();

        prop_assert!(!record.passage.starts_with(' '));
        prop_assert!(!record.passage.contains("  "));
        prop_assert_eq!(record.id, "MEDLINE:1-abstract-3");
    }

    #[test]
    fn test_labels_are_substrings(subtype in "[A-Za-z_#()]{0,24}") {
        let labels = LabelGeneralizer::new().labels_for(&subtype);
        for label in &labels {
            prop_assert!(subtype.contains(label.as_str()));
        }
        for label in CanonicalLabel::ALL {
            if subtype.contains(label.as_str()) {
                prop_assert!(labels.contains(&label));
            }
        }
    }

    #[test]
    fn test_plain_subtypes_unchanged(subtype in "G#[a-z_]{1,20}") {
        prop_assert_eq!(TypeNormalizer::new().normalize(&subtype).unwrap(), subtype);
    }

    #[test]
    fn test_window_mentions_always_align(
        words in prop::collection::vec(0..VOCAB.len(), 1..15),
        windows in prop::collection::vec((0usize..15, 1usize..4, 0..CanonicalLabel::ALL.len()), 1..6)
    ) {
        let tokens: Vec<String> = words.iter().map(|&w| VOCAB[w].to_string()).collect();
        let mentions: Vec<CanonicalMention> = windows
            .iter()
            .map(|&(start, len, label)| {
                let start = start % tokens.len();
                let end = (start + len).min(tokens.len());
                CanonicalMention::new(CanonicalLabel::ALL[label], tokens[start..end].join(" "))
            })
            .collect();

        let answers = SpanAligner::new().align(&tokens, &mentions).unwrap();
        prop_assert_eq!(answers.len(), mentions.len());
        for (answer, mention) in answers.iter().zip(&mentions) {
            prop_assert_eq!(&answer.text, &mention.text);
            prop_assert_eq!(tokens[answer.start_token..answer.end_token].join(" "), answer.text.clone());
        }
    }

    #[test]
    fn test_parallel_assembly_matches_sequential(
        sentences in prop::collection::vec(prop::collection::vec(chunk_strategy(), 1..5), 1..12)
    ) {
        let articles: Vec<Article> = sentences
            .chunks(3)
            .enumerate()
            .map(|(i, group)| {
                let nodes: Vec<SentenceNode> = group.iter().map(|c| build_sentence(c)).collect();
                Article::new(format!("MEDLINE:{}", i), nodes[..1].to_vec(), nodes[1..].to_vec())
            })
            .collect();
        let config = CorpusConfig::default().with_built_time("2021/06/01-12:00:00");

        let sequential = CorpusAssembler::new(config.clone()).unwrap().assemble(&articles).unwrap();
        let parallel = CorpusAssembler::new(config.with_parallel(true).with_max_threads(3))
            .unwrap()
            .assemble(&articles)
            .unwrap();
        prop_assert_eq!(sequential, parallel);
    }
}
