//! Batch driver over a document collection.

use chrono::Utc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{AnalyzeOptions, DocumentSource};
use crate::error::Result;
use crate::model::{Document, Section};
use crate::rank::{Embedder, Ranker, Ranking};
use crate::render::{self, AnalysisOutput, JsonFormat};
use crate::section::SectionBuilder;
use crate::structure::StructureAnalyzer;

/// A document left out of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    /// Document identifier
    pub document: String,
    /// Why it was skipped
    pub reason: String,
}

/// Output of a batch analysis with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// The analysis output
    pub output: AnalysisOutput,

    /// Documents that could not be extracted, in input order
    pub skipped: Vec<SkippedDocument>,

    /// Number of sections built across all processed documents
    pub section_count: usize,

    /// Set when ranking failed and the output carries no sections
    pub ranking_error: Option<String>,
}

impl AnalysisReport {
    /// Check if every document was processed and ranking succeeded.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.ranking_error.is_none()
    }

    /// Render the output as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.output, format)
    }
}

/// Runs structure inference, sectioning and ranking over many documents.
#[derive(Debug, Clone)]
pub struct Analyzer {
    options: AnalyzeOptions,
    structure: StructureAnalyzer,
    sections: SectionBuilder,
    ranker: Ranker,
}

impl Analyzer {
    /// Create an analyzer with default options.
    pub fn new() -> Self {
        Self::with_options(AnalyzeOptions::default())
    }

    /// Create an analyzer with custom options.
    pub fn with_options(options: AnalyzeOptions) -> Self {
        Self {
            structure: StructureAnalyzer::with_options(options.structure.clone()),
            sections: SectionBuilder::with_options(options.sections.clone()),
            ranker: Ranker::with_options(options.rank.clone()),
            options,
        }
    }

    /// Create an analyzer after checking the options.
    pub fn try_with_options(options: AnalyzeOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::with_options(options))
    }

    /// The analyzer's options.
    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Analyse the documents `ids` pulled from `source`.
    ///
    /// Documents the source fails to produce are skipped and reported in
    /// [`AnalysisReport::skipped`]; only extracted documents are listed in
    /// the output's `input_documents`.
    pub fn analyze<S: AsRef<str> + Sync>(
        &self,
        source: &dyn DocumentSource,
        ids: &[S],
        persona: &str,
        job: &str,
        embedder: &dyn Embedder,
    ) -> AnalysisReport {
        log::debug!("Analyzing {} documents from {}", ids.len(), source.name());

        let process = |id: &S| -> Result<Vec<Section>> {
            let document = source.extract(id.as_ref())?;
            Ok(self.document_sections(id.as_ref(), &document))
        };
        let results: Vec<Result<Vec<Section>>> = if self.options.parallel {
            ids.par_iter().map(process).collect()
        } else {
            ids.iter().map(process).collect()
        };

        let mut input_documents = Vec::new();
        let mut sections = Vec::new();
        let mut skipped = Vec::new();
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(mut built) => {
                    input_documents.push(id.as_ref().to_string());
                    sections.append(&mut built);
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", id.as_ref(), e);
                    skipped.push(SkippedDocument {
                        document: id.as_ref().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.finish(input_documents, sections, skipped, persona, job, embedder)
    }

    /// Analyse already extracted documents, given as `(id, document)` pairs.
    pub fn analyze_documents<S: AsRef<str> + Sync>(
        &self,
        documents: &[(S, Document)],
        persona: &str,
        job: &str,
        embedder: &dyn Embedder,
    ) -> AnalysisReport {
        let process = |(id, doc): &(S, Document)| self.document_sections(id.as_ref(), doc);
        let per_document: Vec<Vec<Section>> = if self.options.parallel {
            documents.par_iter().map(process).collect()
        } else {
            documents.iter().map(process).collect()
        };

        let input_documents = documents
            .iter()
            .map(|(id, _)| id.as_ref().to_string())
            .collect();
        let sections = per_document.into_iter().flatten().collect();
        self.finish(input_documents, sections, Vec::new(), persona, job, embedder)
    }

    /// Infer the outline of one document and cut it into sections.
    pub fn document_sections(&self, document_id: &str, document: &Document) -> Vec<Section> {
        let outline = self.structure.analyze(document);
        let sections = self.sections.build(document_id, document, &outline.headings);
        log::debug!("{}: outline titled {:?}", document_id, outline.title);
        sections
    }

    fn finish(
        &self,
        input_documents: Vec<String>,
        sections: Vec<Section>,
        skipped: Vec<SkippedDocument>,
        persona: &str,
        job: &str,
        embedder: &dyn Embedder,
    ) -> AnalysisReport {
        let (ranking, ranking_error) = match self.ranker.rank(&sections, persona, job, embedder) {
            Ok(ranking) => (ranking, None),
            Err(e) => {
                log::warn!("Ranking failed, returning no sections: {}", e);
                (Ranking::default(), Some(e.to_string()))
            }
        };

        log::info!(
            "Analyzed {} documents ({} skipped): {} sections, {} ranked",
            input_documents.len(),
            skipped.len(),
            sections.len(),
            ranking.sections.len()
        );

        let timestamp = self.options.timestamp.unwrap_or_else(Utc::now);
        AnalysisReport {
            output: AnalysisOutput::new(input_documents, persona, job, timestamp, &ranking),
            skipped,
            section_count: sections.len(),
            ranking_error,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::MemorySource;
    use crate::error::Error;
    use crate::model::{BBox, Page, Span};
    use crate::rank::HashingEmbedder;
    use chrono::TimeZone;

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(Error::Embedding("model unavailable".into()))
        }
    }

    fn recipe_document() -> Document {
        let mut page = Page::letter(0);
        page.add_span(Span::new("Soups", 24.0, BBox::new(72.0, 80.0, 300.0, 104.0)).bold());
        page.add_span(Span::new(
            "Simmer tomato and basil slowly.",
            11.0,
            BBox::new(72.0, 120.0, 400.0, 131.0),
        ));
        page.add_span(Span::new("Breads", 24.0, BBox::new(72.0, 300.0, 300.0, 324.0)).bold());
        page.add_span(Span::new(
            "Knead the dough and let it rise.",
            11.0,
            BBox::new(72.0, 340.0, 400.0, 351.0),
        ));
        Document::new().with_title("Recipes").with_page(page)
    }

    fn analyzer() -> Analyzer {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        Analyzer::with_options(AnalyzeOptions::new().with_timestamp(ts))
    }

    #[test]
    fn test_missing_documents_are_skipped() {
        let source = MemorySource::new().with_document("recipes.pdf", recipe_document());
        let report = analyzer().analyze(
            &source,
            &["recipes.pdf", "lost.pdf"],
            "Cook",
            "bake bread",
            &HashingEmbedder::default(),
        );

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].document, "lost.pdf");
        assert!(report.skipped[0].reason.contains("lost.pdf"));
        assert_eq!(report.output.metadata.input_documents, vec!["recipes.pdf"]);
        assert_eq!(report.section_count, 2);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_embedding_failure_degrades_to_empty_ranking() {
        let report = analyzer().analyze_documents(
            &[("recipes.pdf", recipe_document())],
            "Cook",
            "bake bread",
            &FailingEmbedder,
        );

        assert!(report.output.is_empty());
        assert!(report
            .ranking_error
            .as_deref()
            .is_some_and(|e| e.contains("model unavailable")));
        assert_eq!(report.section_count, 2);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let documents = vec![
            ("a.pdf", recipe_document()),
            ("b.pdf", recipe_document().with_title("More Recipes")),
        ];
        let sequential = analyzer().analyze_documents(&documents, "Cook", "soup", &HashingEmbedder::default());

        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let parallel = Analyzer::with_options(AnalyzeOptions::new().with_timestamp(ts).with_parallel(true))
            .analyze_documents(&documents, "Cook", "soup", &HashingEmbedder::default());

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_document_sections() {
        let sections = Analyzer::new().document_sections("recipes.pdf", &recipe_document());
        // Same-page headings are ordered by text, so "Breads" comes first
        // and its section closes above "Soups".
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].document_id, "recipes.pdf");
        assert_eq!(sections[0].title, "Breads");
        assert!(sections[0].is_empty());
        assert_eq!(sections[1].title, "Soups");
        assert_eq!(
            sections[1].content,
            "Simmer tomato and basil slowly. Breads Knead the dough and let it rise."
        );
    }
}
