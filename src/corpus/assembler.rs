//! Corpus assembly: all articles into one dataset bundle.
//!
//! Articles are independent of each other, so the assembler can convert
//! them on the Rayon pool ([`CorpusConfig::parallel`]). Results are always
//! collected in article order, so the parallel and sequential paths produce
//! identical bundles.

use crate::document::Article;
use crate::errors::{CorpusError, Result};
use crate::pipeline::runner::{SentenceContext, SentencePipeline};
use crate::types::{CorpusConfig, DatasetBundle, FailurePolicy, Section, SentenceRecord};
use rayon::prelude::*;
use std::fmt;
use tracing::{info, warn};

/// An article left out of the bundle, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFailure {
    pub article_id: String,
    pub error: CorpusError,
}

impl fmt::Display for ArticleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.article_id, self.error)
    }
}

/// Converts a parsed corpus into a [`DatasetBundle`]
pub struct CorpusAssembler {
    config: CorpusConfig,
    pipeline: SentencePipeline,
}

impl CorpusAssembler {
    /// Create an assembler; the config is validated first
    pub fn new(config: CorpusConfig) -> Result<Self> {
        Self::with_pipeline(config, SentencePipeline::new())
    }

    /// Create an assembler with a custom sentence pipeline
    pub fn with_pipeline(config: CorpusConfig, pipeline: SentencePipeline) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, pipeline })
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Convert one article: its title sentences, then its abstract sentences.
    ///
    /// The sentence index runs across both sections. The first failing
    /// sentence aborts the article.
    pub fn process_article(&self, article_index: usize, article: &Article) -> Result<Vec<SentenceRecord>> {
        article.check()?;

        let detailed = article_index < self.config.debug_articles;
        let mut records = Vec::new();
        let mut sentence_index = 0;

        for section in Section::ORDER {
            for sentence in article.section(section)? {
                let ctx = SentenceContext {
                    article_id: &article.medline_id,
                    section,
                    sentence_index,
                    detailed,
                };
                records.push(self.pipeline.run(ctx, sentence)?);
                sentence_index += 1;
            }
        }

        Ok(records)
    }

    /// Build the bundle according to the configured [`FailurePolicy`].
    ///
    /// With [`FailurePolicy::Abort`] the first failing article's error is
    /// returned. With [`FailurePolicy::SkipArticle`] failing articles are
    /// logged and left out.
    pub fn assemble(&self, articles: &[Article]) -> Result<DatasetBundle> {
        let (bundle, _) = self.assemble_with(articles, self.config.failure_policy)?;
        Ok(bundle)
    }

    /// Build the bundle from every article that converts cleanly and report
    /// the others, for annotation review.
    pub fn assemble_partial(&self, articles: &[Article]) -> Result<(DatasetBundle, Vec<ArticleFailure>)> {
        self.assemble_with(articles, FailurePolicy::SkipArticle)
    }

    fn assemble_with(
        &self,
        articles: &[Article],
        policy: FailurePolicy,
    ) -> Result<(DatasetBundle, Vec<ArticleFailure>)> {
        info!(
            articles = articles.len(),
            parallel = self.config.parallel,
            version = %self.config.version,
            "assembling dataset"
        );

        let results = self.convert(articles)?;

        let mut records = Vec::new();
        let mut failures = Vec::new();
        for (article, result) in articles.iter().zip(results) {
            match result {
                Ok(article_records) => records.extend(article_records),
                Err(error) => match policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::SkipArticle => {
                        warn!(article = %article.medline_id, %error, "skipping article");
                        failures.push(ArticleFailure {
                            article_id: article.medline_id.clone(),
                            error,
                        });
                    }
                },
            }
        }

        let bundle = DatasetBundle::new(
            self.config.resolved_built_time(),
            self.config.version.clone(),
            records,
        );
        info!(
            built_time = %bundle.built_time,
            size = bundle.len(),
            failed_articles = failures.len(),
            "dataset assembled"
        );

        Ok((bundle, failures))
    }

    /// Convert every article, in article order
    fn convert(&self, articles: &[Article]) -> Result<Vec<Result<Vec<SentenceRecord>>>> {
        if self.config.parallel {
            self.config.scoped(|| {
                articles
                    .par_iter()
                    .enumerate()
                    .map(|(i, article)| self.process_article(i, article))
                    .collect()
            })
        } else {
            Ok(articles
                .iter()
                .enumerate()
                .map(|(i, article)| self.process_article(i, article))
                .collect())
        }
    }
}
