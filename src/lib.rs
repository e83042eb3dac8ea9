//! # docsift
//!
//! Heading outline inference, section segmentation and persona-driven
//! relevance ranking for extracted document layouts.
//!
//! The library consumes pages of positioned, styled text spans (as produced
//! by a PDF extractor), infers a title and an H1/H2/H3 outline from font
//! statistics and text shape, cuts each document into heading-bounded
//! sections and ranks those sections against a "persona + job" query.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{analyze, HashingEmbedder, JsonFormat, MemorySource, Document};
//!
//! fn main() -> docsift::Result<()> {
//!     let json = std::fs::read_to_string("guide.json")?;
//!     let source = MemorySource::new().with_document("guide.pdf", Document::from_json(&json)?);
//!
//!     let report = analyze(
//!         &source,
//!         &["guide.pdf"],
//!         "HR professional",
//!         "Create fillable forms for onboarding",
//!         &HashingEmbedder::default(),
//!     );
//!     println!("{}", report.to_json(JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Structure inference**: title detection and leveled headings from
//!   font size, boldness, position and text patterns
//! - **Sectioning**: page-crossing section bounds from located headings
//! - **Ranking**: batched embeddings, cosine similarity, exclusion and
//!   boost rules, refined snippets
//! - **Pluggable collaborators**: `DocumentSource` and `Embedder` traits
//! - **Parallel processing**: Uses Rayon for multi-document batches

pub mod analyze;
pub mod error;
pub mod model;
pub mod rank;
pub mod render;
pub mod section;
pub mod structure;

// Re-export commonly used types
pub use analyze::{
    AnalysisReport, AnalyzeOptions, Analyzer, DocumentSource, MemorySource, SkippedDocument,
};
pub use error::{Error, Result};
pub use model::{
    BBox, Document, Heading, HeadingLevel, Outline, Page, RankedSection, Section, Span,
    SubsectionSnippet,
};
pub use rank::{
    cosine_similarity, BoostRule, BoostTarget, Embedder, ExclusionRule, HashingEmbedder,
    RankOptions, Ranker, Ranking, RuleSet,
};
pub use render::{AnalysisOutput, JsonFormat};
pub use section::{HeadingOrder, SectionBuilder, SectionOptions};
pub use structure::{StructureAnalyzer, StructureOptions, TitleOptions};

use chrono::{DateTime, Utc};

/// Infer the title and heading outline of a document.
///
/// # Example
///
/// ```
/// use docsift::{infer_structure, BBox, Document, Page, Span};
///
/// let page = Page::letter(0)
///     .with_span(Span::new("Introduction", 24.0, BBox::new(72.0, 60.0, 300.0, 84.0)).bold())
///     .with_span(Span::new("Body text.", 11.0, BBox::new(72.0, 120.0, 400.0, 131.0)))
///     .with_span(Span::new("More body text.", 11.0, BBox::new(72.0, 140.0, 400.0, 151.0)));
/// let outline = infer_structure(&Document::new().with_page(page));
/// assert_eq!(outline.headings[0].text, "Introduction");
/// ```
pub fn infer_structure(doc: &Document) -> Outline {
    StructureAnalyzer::new().analyze(doc)
}

/// Infer the outline of a document with custom options.
pub fn infer_structure_with_options(doc: &Document, options: StructureOptions) -> Outline {
    StructureAnalyzer::with_options(options).analyze(doc)
}

/// Cut a document into one section per heading.
pub fn build_sections(document_id: &str, doc: &Document, headings: &[Heading]) -> Vec<Section> {
    SectionBuilder::new().build(document_id, doc, headings)
}

/// Rank sections against a persona and job with default options.
///
/// Fails only when the embedder fails or returns the wrong number of
/// vectors.
pub fn rank(
    sections: &[Section],
    persona: &str,
    job: &str,
    embedder: &dyn Embedder,
) -> Result<Ranking> {
    Ranker::new().rank(sections, persona, job, embedder)
}

/// Analyse a document collection with default options.
///
/// Documents the source cannot produce are skipped and listed in the
/// report; an embedding failure yields an empty ranking.
pub fn analyze<S: AsRef<str> + Sync>(
    source: &dyn DocumentSource,
    ids: &[S],
    persona: &str,
    job: &str,
    embedder: &dyn Embedder,
) -> AnalysisReport {
    Analyzer::new().analyze(source, ids, persona, job, embedder)
}

/// Builder for configuring and running an analysis.
///
/// # Example
///
/// ```no_run
/// use docsift::{DocSift, HashingEmbedder, JsonFormat, MemorySource};
///
/// let source = MemorySource::new();
/// let json = DocSift::new()
///     .with_max_sections(10)
///     .positional()
///     .parallel()
///     .analyze(&source, &["a.pdf", "b.pdf"], "Travel planner", "Plan a 4 day trip", &HashingEmbedder::default())
///     .to_json(JsonFormat::Pretty)?;
/// # Ok::<(), docsift::Error>(())
/// ```
pub struct DocSift {
    options: AnalyzeOptions,
}

impl DocSift {
    /// Create a new DocSift builder.
    pub fn new() -> Self {
        Self {
            options: AnalyzeOptions::default(),
        }
    }

    /// Process documents in parallel.
    pub fn parallel(mut self) -> Self {
        self.options = self.options.with_parallel(true);
        self
    }

    /// Enable CJK, Hiragana and Katakana heading patterns.
    pub fn multilingual(mut self) -> Self {
        self.options.structure = self.options.structure.with_multilingual(true);
        self
    }

    /// Order same-page headings top-to-bottom when building sections.
    pub fn positional(mut self) -> Self {
        self.options.sections = self.options.sections.positional();
        self
    }

    /// Set the heading score cutoff.
    pub fn with_candidate_threshold(mut self, threshold: f64) -> Self {
        self.options.structure = self.options.structure.with_candidate_threshold(threshold);
        self
    }

    /// Drop sections with fewer content words.
    pub fn with_min_content_words(mut self, words: usize) -> Self {
        self.options.sections = self.options.sections.with_min_content_words(words);
        self
    }

    /// Set the number of ranked sections and snippets.
    pub fn with_max_sections(mut self, max: usize) -> Self {
        self.options.rank = self.options.rank.with_max_sections(max).with_max_snippets(max);
        self
    }

    /// Replace the exclusion and boost rules.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.options.rank = self.options.rank.with_rules(rules);
        self
    }

    /// Disable all exclusion and boost rules.
    pub fn without_rules(mut self) -> Self {
        self.options.rank = self.options.rank.without_rules();
        self
    }

    /// Use a fixed processing timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.options = self.options.with_timestamp(timestamp);
        self
    }

    /// Get the configured options.
    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Build the configured analyzer.
    pub fn build(self) -> Analyzer {
        Analyzer::with_options(self.options)
    }

    /// Build the configured analyzer, rejecting out-of-range options.
    pub fn try_build(self) -> Result<Analyzer> {
        Analyzer::try_with_options(self.options)
    }

    /// Analyse documents pulled from a source.
    pub fn analyze<S: AsRef<str> + Sync>(
        self,
        source: &dyn DocumentSource,
        ids: &[S],
        persona: &str,
        job: &str,
        embedder: &dyn Embedder,
    ) -> AnalysisReport {
        self.build().analyze(source, ids, persona, job, embedder)
    }
}

impl Default for DocSift {
    fn default() -> Self {
        Self::new()
    }
}
