//! Integration tests for sectioning, ranking and batch analysis.

use chrono::{TimeZone, Utc};
use docsift::error::{Error, Result};
use docsift::{
    analyze, build_sections, infer_structure, AnalyzeOptions, Analyzer, BBox, DocSift, Document,
    DocumentSource, Embedder, HashingEmbedder, JsonFormat, MemorySource, Page, RankOptions, Span,
};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Build a document with one section per page: a bold heading followed by
/// two body lines.
fn sectioned_document(sections: &[(&str, &str, &str)]) -> Document {
    let mut doc = Document::new();
    for (i, (heading, first, second)) in sections.iter().enumerate() {
        doc.add_page(
            Page::letter(i as u32)
                .with_span(Span::new(*heading, 20.0, BBox::new(72.0, 72.0, 400.0, 92.0)).bold())
                .with_span(Span::new(*first, 11.0, BBox::new(72.0, 120.0, 500.0, 131.0)))
                .with_span(Span::new(*second, 11.0, BBox::new(72.0, 140.0, 500.0, 151.0))),
        );
    }
    doc
}

fn mains() -> Document {
    sectioned_document(&[
        (
            "Lentil Curry",
            "simmer red lentils with coconut milk.",
            "serve with steamed rice.",
        ),
        (
            "Chicken Soup",
            "simmer the chicken broth with carrots.",
            "season well before serving.",
        ),
        (
            "Stuffed Peppers",
            "fill peppers with rice and beans.",
            "bake until tender.",
        ),
    ])
}

fn sides() -> Document {
    sectioned_document(&[
        (
            "Garden Salad",
            "toss lettuce with olive oil.",
            "add fresh herbs to finish.",
        ),
        (
            "Roasted Vegetables",
            "roast seasonal vegetables until golden.",
            "drizzle with balsamic glaze.",
        ),
        (
            "Vegetable Soup",
            "simmer vegetables in a light stock.",
            "blend half for body.",
        ),
        (
            "Herb Dip",
            "whisk yogurt with chopped herbs.",
            "chill before serving.",
        ),
    ])
}

fn source() -> MemorySource {
    MemorySource::new()
        .with_document("Dinner Mains.pdf", mains())
        .with_document("Sides.pdf", sides())
}

fn fixed_options() -> AnalyzeOptions {
    AnalyzeOptions::new().with_timestamp(Utc.with_ymd_and_hms(2024, 7, 15, 8, 0, 0).unwrap())
}

/// Source that fails for identifiers starting with "corrupt".
struct FlakySource {
    inner: MemorySource,
}

impl DocumentSource for FlakySource {
    fn extract(&self, id: &str) -> Result<Document> {
        if id.starts_with("corrupt") {
            return Err(Error::extraction(id, "xref table damaged"));
        }
        self.inner.extract(id)
    }
}

/// Hashing embedder that counts batch calls.
struct CountingEmbedder {
    inner: HashingEmbedder,
    batches: AtomicUsize,
}

impl CountingEmbedder {
    fn new() -> Self {
        Self {
            inner: HashingEmbedder::default(),
            batches: AtomicUsize::new(0),
        }
    }
}

impl Embedder for CountingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.inner.embed(text)
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        self.inner.embed_batch(texts)
    }
}

// ==================== Sectioning ====================

#[test]
fn test_sections_follow_outline() {
    let doc = mains();
    let outline = infer_structure(&doc);
    assert_eq!(outline.headings.len(), 3);

    let sections = build_sections("Dinner Mains.pdf", &doc, &outline.headings);
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[1].title, "Chicken Soup");
    assert_eq!(sections[1].start_page, 1);
    assert_eq!(
        sections[1].content,
        "simmer the chicken broth with carrots. season well before serving."
    );
}

// ==================== Scenarios ====================

#[test]
fn test_vegetarian_query_drops_meat_sections() {
    let report = Analyzer::with_options(fixed_options().with_rank(RankOptions::new().with_max_sections(10)))
        .analyze(
            &source(),
            &["Dinner Mains.pdf", "Sides.pdf"],
            "Food Contractor",
            "Prepare a vegetarian buffet-style dinner menu",
            &HashingEmbedder::default(),
        );

    assert!(report.is_complete());
    assert_eq!(report.section_count, 7);
    let titles: Vec<_> = report
        .output
        .extracted_sections
        .iter()
        .map(|s| s.section_title.as_str())
        .collect();
    assert_eq!(titles.len(), 6);
    assert!(!titles.contains(&"Chicken Soup"));
}

#[test]
fn test_zero_documents() {
    let ids: Vec<String> = Vec::new();
    let report = Analyzer::with_options(fixed_options()).analyze(
        &source(),
        &ids,
        "Travel Planner",
        "Plan a trip",
        &HashingEmbedder::default(),
    );

    let json: Value = serde_json::from_str(&report.to_json(JsonFormat::Compact).unwrap()).unwrap();
    assert_eq!(json["metadata"]["persona"], "Travel Planner");
    assert_eq!(json["metadata"]["job_to_be_done"], "Plan a trip");
    assert_eq!(json["metadata"]["input_documents"], Value::Array(Vec::new()));
    assert_eq!(json["extracted_sections"], Value::Array(Vec::new()));
    assert_eq!(json["subsection_analysis"], Value::Array(Vec::new()));
}

#[test]
fn test_failed_extraction_is_isolated() {
    let source = FlakySource { inner: source() };
    let report = Analyzer::with_options(fixed_options()).analyze(
        &source,
        &["corrupt.pdf", "Sides.pdf"],
        "Chef",
        "side dishes",
        &HashingEmbedder::default(),
    );

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].document, "corrupt.pdf");
    assert_eq!(report.output.metadata.input_documents, vec!["Sides.pdf"]);
    assert!(report.skipped[0].reason.contains("xref table damaged"));
    assert_eq!(report.section_count, 4);
    assert!(report
        .output
        .extracted_sections
        .iter()
        .all(|s| s.document == "Sides.pdf"));
}

#[test]
fn test_every_extraction_fails() {
    let source = FlakySource { inner: source() };
    let ids = ["corrupt-a.pdf", "corrupt-b.pdf", "corrupt-c.pdf"];
    let report = Analyzer::with_options(fixed_options().with_parallel(true)).analyze(
        &source,
        &ids,
        "Chef",
        "side dishes",
        &HashingEmbedder::default(),
    );

    assert_eq!(report.skipped.len(), ids.len());
    let skipped: Vec<_> = report.skipped.iter().map(|s| s.document.as_str()).collect();
    assert_eq!(skipped, ids);
    assert_eq!(report.section_count, 0);
    assert!(report.ranking_error.is_none());
    assert!(report.output.metadata.input_documents.is_empty());
    assert!(report.output.extracted_sections.is_empty());
    assert!(report.output.subsection_analysis.is_empty());
    assert!(!report.is_complete());
}

// ==================== Ranking Properties ====================

#[test]
fn test_default_limits_and_rank_permutation() {
    let report = analyze(
        &source(),
        &["Dinner Mains.pdf", "Sides.pdf"],
        "Chef",
        "soup and salad ideas",
        &HashingEmbedder::default(),
    );

    let sections = &report.output.extracted_sections;
    assert_eq!(sections.len(), 5);
    let ranks: Vec<usize> = sections.iter().map(|s| s.importance_rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);

    let snippets = &report.output.subsection_analysis;
    assert_eq!(snippets.len(), 5);
    for (section, snippet) in sections.iter().zip(snippets) {
        assert_eq!(section.document, snippet.document);
        assert_eq!(section.page_number, snippet.page_number);
        assert!(snippet.refined_text.chars().count() <= 500);
        assert!(snippet.page_number >= 1);
    }
}

#[test]
fn test_embeddings_are_batched_once() {
    let embedder = CountingEmbedder::new();
    let report = Analyzer::with_options(fixed_options()).analyze(
        &source(),
        &["Dinner Mains.pdf", "Sides.pdf"],
        "Chef",
        "weeknight dinner",
        &embedder,
    );

    assert!(!report.output.is_empty());
    assert_eq!(embedder.batches.load(Ordering::SeqCst), 1);
}

#[test]
fn test_analysis_is_deterministic() {
    let ids = ["Dinner Mains.pdf", "Sides.pdf"];
    let run = |parallel: bool| {
        Analyzer::with_options(fixed_options().with_parallel(parallel))
            .analyze(&source(), &ids, "Chef", "vegetable soup", &HashingEmbedder::default())
            .to_json(JsonFormat::Pretty)
            .unwrap()
    };

    let first = run(false);
    assert_eq!(first, run(false));
    assert_eq!(first, run(true));
}

#[test]
fn test_form_titles_are_boosted() {
    let forms = sectioned_document(&[
        (
            "Signing Basics",
            "open the document and sign it.",
            "save a copy when done.",
        ),
        (
            "Fillable Forms",
            "add fields so the document can be completed.",
            "save a copy when done.",
        ),
    ]);
    let source = MemorySource::new().with_document("Acrobat Guide.pdf", forms);

    let report = DocSift::new()
        .with_timestamp(Utc.with_ymd_and_hms(2024, 7, 15, 8, 0, 0).unwrap())
        .analyze(
            &source,
            &["Acrobat Guide.pdf"],
            "HR professional",
            "create forms to sign the document",
            &HashingEmbedder::default(),
        );

    assert_eq!(report.output.extracted_sections[0].section_title, "Fillable Forms");
}

#[test]
fn test_rules_can_be_disabled() {
    let report = DocSift::new()
        .without_rules()
        .with_max_sections(10)
        .analyze(
            &source(),
            &["Dinner Mains.pdf"],
            "Food Contractor",
            "vegetarian dinner",
            &HashingEmbedder::default(),
        );

    assert!(report
        .output
        .extracted_sections
        .iter()
        .any(|s| s.section_title == "Chicken Soup"));
}
