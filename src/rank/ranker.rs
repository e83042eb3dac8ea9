//! Relevance ranking of sections against a persona query.

use super::{cosine_similarity, Embedder, RankOptions, RuleEngine, SnippetExtractor};
use crate::error::{Error, Result};
use crate::model::{RankedSection, Section, SubsectionSnippet};

/// Outcome of ranking one section collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    /// Kept sections, most relevant first, ranks 1..N
    pub sections: Vec<RankedSection>,

    /// Snippets of the top-ranked sections, in rank order
    pub snippets: Vec<SubsectionSnippet>,

    /// Candidates dropped by exclusion rules
    pub excluded: usize,
}

impl Ranking {
    /// Check if nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Ranks sections by semantic similarity plus rule adjustments.
#[derive(Debug, Clone)]
pub struct Ranker {
    options: RankOptions,
    rules: RuleEngine,
    snippets: SnippetExtractor,
}

impl Ranker {
    /// Create a ranker with default options.
    pub fn new() -> Self {
        Self::with_options(RankOptions::default())
    }

    /// Create a ranker with custom options.
    pub fn with_options(options: RankOptions) -> Self {
        let rules = RuleEngine::new(&options.rules);
        let snippets = SnippetExtractor::new(options.snippet_sentences, options.snippet_chars);
        Self {
            options,
            rules,
            snippets,
        }
    }

    /// The ranker's options.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// The query string for a persona and task.
    pub fn query(persona: &str, job: &str) -> String {
        format!("{} {}", persona, job)
    }

    /// Rank sections against the persona and job.
    ///
    /// All section texts are embedded in one batch. Cosine similarity is
    /// mapped onto [0, 1] so that boosts always raise a score. The
    /// `candidate_pool` most similar sections pass through the exclusion and
    /// boost rules, and the survivors are ranked by their final score.
    /// Sorting is stable, so equal scores keep input order.
    ///
    /// Fails when the embedder fails, returns the wrong number of vectors,
    /// or returns vectors whose length differs from the query vector.
    pub fn rank(
        &self,
        sections: &[Section],
        persona: &str,
        job: &str,
        embedder: &dyn Embedder,
    ) -> Result<Ranking> {
        if sections.is_empty() {
            log::debug!("No sections to rank");
            return Ok(Ranking::default());
        }

        let query = Self::query(persona, job);
        let texts: Vec<String> = sections.iter().map(Section::embedding_text).collect();
        let vectors = embedder.embed_batch(&texts)?;
        if vectors.len() != texts.len() {
            return Err(Error::EmbeddingCount {
                expected: texts.len(),
                got: vectors.len(),
            });
        }
        let query_vector = embedder.embed(&query)?;
        if let Some(v) = vectors.iter().find(|v| v.len() != query_vector.len()) {
            return Err(Error::DimensionMismatch {
                expected: query_vector.len(),
                got: v.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, relevance(cosine_similarity(&query_vector, v))))
            .collect();
        sort_descending(&mut scored);
        scored.truncate(self.options.candidate_pool);
        let pool = scored.len();

        let active = self.rules.activate(&query);
        let mut kept: Vec<(usize, f32)> = scored
            .into_iter()
            .filter(|(i, _)| !active.excludes(&sections[*i]))
            .map(|(i, score)| (i, score * active.boost_factor(&sections[i])))
            .collect();
        let excluded = pool - kept.len();
        sort_descending(&mut kept);
        kept.truncate(self.options.max_sections);

        let ranked: Vec<RankedSection> = kept
            .into_iter()
            .enumerate()
            .map(|(position, (i, relevance_score))| RankedSection {
                section: sections[i].clone(),
                relevance_score,
                importance_rank: position + 1,
            })
            .collect();

        let snippets = ranked
            .iter()
            .take(self.options.max_snippets)
            .map(|r| SubsectionSnippet {
                document_id: r.section.document_id.clone(),
                page_index: r.section.start_page,
                refined_text: self.snippets.extract(&r.section.content),
            })
            .collect();

        log::debug!(
            "Ranked {} sections with {}: {} candidates, {} excluded, {} kept",
            sections.len(),
            embedder.name(),
            pool,
            excluded,
            ranked.len()
        );

        Ok(Ranking {
            sections: ranked,
            snippets,
            excluded,
        })
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a cosine similarity in [-1, 1] onto [0, 1], preserving order.
fn relevance(cosine: f32) -> f32 {
    (1.0 + cosine) / 2.0
}

/// Stable sort by score, highest first.
fn sort_descending(scored: &mut [(usize, f32)]) {
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
}
