//! Heading outline inference from styled spans.
//!
//! The analyzer works in five passes over a document:
//!
//! 1. title detection (metadata, else merged top-of-first-page spans)
//! 2. font size statistics (median and significant sizes)
//! 3. candidate scoring (size, position and text shape, with penalties)
//! 4. level assignment (by size group, else by score percentile)
//! 5. ordering, deduplication and capping
//!
//! Each pass is a pure function of its inputs; scoring produces new
//! [`HeadingCandidate`] records and never mutates the spans.

use std::collections::{BTreeMap, HashSet};

use rayon::prelude::*;
use unicode_normalization::UnicodeNormalization;

use super::patterns::{self, HeadingPatterns};
use super::{StructureOptions, StyleStatistics};
use crate::model::{Document, Heading, HeadingLevel, Outline, Span};

/// Content score for text matching a heading-shaped pattern.
const PATTERN_SCORE: f64 = 0.5;
/// Content score floor for short all-caps text.
const ALL_CAPS_SCORE: f64 = 0.4;
/// Content score floor for very short text set in a large size.
const LARGE_SHORT_SCORE: f64 = 0.3;
/// Content score floor for short title-case text.
const TITLE_CASE_SCORE: f64 = 0.2;

const ALL_CAPS_MAX_WORDS: usize = 10;
const TITLE_CASE_MAX_WORDS: usize = 8;
const LARGE_SHORT_MAX_WORDS: usize = 5;

/// A span scored as a potential heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingCandidate<'a> {
    /// The scored span
    pub span: &'a Span,
    /// Composite heading score
    pub heading_score: f64,
}

/// Structure inference engine.
#[derive(Debug, Clone)]
pub struct StructureAnalyzer {
    options: StructureOptions,
    patterns: HeadingPatterns,
}

impl StructureAnalyzer {
    /// Create an analyzer with default options.
    pub fn new() -> Self {
        Self::with_options(StructureOptions::default())
    }

    /// Create an analyzer with custom options.
    pub fn with_options(options: StructureOptions) -> Self {
        let patterns = HeadingPatterns::new(options.multilingual);
        Self { options, patterns }
    }

    /// The analyzer's options.
    pub fn options(&self) -> &StructureOptions {
        &self.options
    }

    /// Infer the title and heading outline of a document.
    pub fn analyze(&self, doc: &Document) -> Outline {
        let title = self.find_title(doc);

        let spans = content_spans(doc);
        if spans.is_empty() {
            log::debug!("No text spans, outline is empty");
            return Outline::new(title, Vec::new());
        }

        let stats = StyleStatistics::from_spans(spans.iter().copied(), self.options.significance_ratio);
        let candidates = self.score_candidates(&spans, &stats);
        let headings = self.assign_levels(&candidates);
        let headings = self.finalize(headings);

        log::debug!(
            "Structure: {} spans, median size {:.1}, {} significant sizes, {} candidates, {} headings",
            spans.len(),
            stats.median_size,
            stats.significant_sizes.len(),
            candidates.len(),
            headings.len()
        );

        Outline::new(title, headings)
    }

    /// Font size statistics over the document's non-blank spans.
    pub fn statistics(&self, doc: &Document) -> StyleStatistics {
        StyleStatistics::from_spans(content_spans(doc), self.options.significance_ratio)
    }

    /// All spans of the document scoring above the candidate threshold,
    /// in document order.
    pub fn candidates<'a>(&self, doc: &'a Document) -> Vec<HeadingCandidate<'a>> {
        let spans = content_spans(doc);
        let stats = StyleStatistics::from_spans(spans.iter().copied(), self.options.significance_ratio);
        self.score_candidates(&spans, &stats)
    }

    fn score_candidates<'a>(
        &self,
        spans: &[&'a Span],
        stats: &StyleStatistics,
    ) -> Vec<HeadingCandidate<'a>> {
        if self.options.parallel {
            spans
                .par_iter()
                .filter_map(|span| self.candidate(*span, stats))
                .collect()
        } else {
            spans
                .iter()
                .filter_map(|span| self.candidate(*span, stats))
                .collect()
        }
    }

    /// Score a span, keeping it only when it clears the candidate threshold.
    pub fn candidate<'a>(
        &self,
        span: &'a Span,
        stats: &StyleStatistics,
    ) -> Option<HeadingCandidate<'a>> {
        let heading_score = self.score_span(span, stats);
        (heading_score > self.options.candidate_threshold).then_some(HeadingCandidate {
            span,
            heading_score,
        })
    }

    /// Composite heading score of a span.
    ///
    /// `size * w_style + position * w_position + content * w_content`,
    /// then the long-text, continuation and numeric penalties in that order.
    pub fn score_span(&self, span: &Span, stats: &StyleStatistics) -> f64 {
        let opts = &self.options;
        let text = span.text.as_str();

        let mut score = self.size_score(span, stats) * opts.style_weight
            + self.position_score(span) * opts.position_weight
            + self.content_score(span, stats) * opts.content_weight;

        if patterns::char_len(text) > opts.long_text_chars {
            score *= opts.long_text_penalty;
        }
        if patterns::ends_with_continuation(text) {
            score *= opts.continuation_penalty;
        }
        if self.patterns.is_numeric_only(text) {
            score *= opts.numeric_penalty;
        }

        score
    }

    fn size_score(&self, span: &Span, stats: &StyleStatistics) -> f64 {
        let size = f64::from(span.font_size);
        let mut score = 0.0;
        if stats.is_significant(span.font_size) {
            score = (size / (stats.median_size * self.options.size_normalization)).min(1.0);
        }

        // The flag takes precedence over the font name.
        if span.has_bold_flag() {
            score = (score + self.options.bold_flag_boost).min(1.0);
        } else if span.has_bold_font_name() {
            score = (score + self.options.bold_font_boost).min(1.0);
        }
        score
    }

    fn content_score(&self, span: &Span, stats: &StyleStatistics) -> f64 {
        let text = span.text.as_str();
        let words = patterns::word_count(text);

        let mut score: f64 = 0.0;
        if self.patterns.is_heading_shaped(text) {
            score = PATTERN_SCORE;
        }
        if words <= ALL_CAPS_MAX_WORDS && patterns::is_all_caps(text) {
            score = score.max(ALL_CAPS_SCORE);
        }
        if words <= TITLE_CASE_MAX_WORDS && patterns::is_title_case(text) {
            score = score.max(TITLE_CASE_SCORE);
        }
        if words <= LARGE_SHORT_MAX_WORDS
            && f64::from(span.font_size) > stats.median_size * self.options.large_size_ratio
        {
            score = score.max(LARGE_SHORT_SCORE);
        }
        score
    }

    fn position_score(&self, span: &Span) -> f64 {
        (1.0 - f64::from(span.top()) / self.options.position_normalization).max(0.0)
    }

    /// Assign heading levels.
    ///
    /// With three or more distinct rounded sizes among the candidates, the
    /// three largest sizes map to H1-H3 and smaller sizes are dropped.
    /// Otherwise levels split by score rank: the top `h1_fraction` of
    /// candidates become H1, up to `h2_fraction` H2, the rest H3.
    fn assign_levels(&self, candidates: &[HeadingCandidate<'_>]) -> Vec<Heading> {
        let mut ranked: Vec<&HeadingCandidate<'_>> = candidates.iter().collect();
        ranked.sort_by(|a, b| b.heading_score.total_cmp(&a.heading_score));

        let mut size_groups: BTreeMap<i64, Vec<&HeadingCandidate<'_>>> = BTreeMap::new();
        for cand in &ranked {
            size_groups
                .entry(rounded_size(cand.span.font_size))
                .or_default()
                .push(cand);
        }

        if size_groups.len() >= 3 {
            size_groups
                .values()
                .rev()
                .take(3)
                .enumerate()
                .flat_map(|(rank, group)| {
                    let level = HeadingLevel::from_rank(rank).unwrap_or(HeadingLevel::H3);
                    group
                        .iter()
                        .map(move |c| Heading::new(level, &c.span.text, c.span.page_index))
                })
                .collect()
        } else {
            let total = ranked.len() as f64;
            ranked
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let position = i as f64;
                    let level = if position < total * self.options.h1_fraction {
                        HeadingLevel::H1
                    } else if position < total * self.options.h2_fraction {
                        HeadingLevel::H2
                    } else {
                        HeadingLevel::H3
                    };
                    Heading::new(level, &c.span.text, c.span.page_index)
                })
                .collect()
        }
    }

    /// Order by (page, level), then drop duplicates and noise, then cap.
    fn finalize(&self, mut headings: Vec<Heading>) -> Vec<Heading> {
        headings.sort_by_key(|h| (h.page_index, h.level));

        let mut seen: HashSet<String> = HashSet::new();
        let mut unique = Vec::new();

        for heading in headings {
            if unique.len() >= self.options.max_headings {
                break;
            }
            let key: String = heading.text.to_lowercase().nfc().collect();

            if seen.contains(&key)
                || self.patterns.is_page_number(&key)
                || patterns::char_len(&heading.text) < self.options.min_heading_chars
                || self.patterns.contains_date(&heading.text)
            {
                continue;
            }

            seen.insert(key);
            unique.push(heading);
        }

        unique
    }

    /// Document title from metadata, else inferred from the first page.
    ///
    /// Spans in the top region of the first page are sorted top-down; the
    /// first one opens the title and following spans are merged while they
    /// stay close, similar in size and long enough.
    pub fn find_title(&self, doc: &Document) -> String {
        if !doc.title.trim().is_empty() {
            return doc.title.clone();
        }

        let opts = &self.options.title;
        let Some(page) = doc.pages.first() else {
            return opts.fallback.clone();
        };

        let height = if page.height > 0.0 {
            page.height
        } else {
            opts.default_page_height
        };
        let limit = height * opts.top_region;

        let mut top: Vec<&Span> = page
            .spans
            .iter()
            .filter(|s| !s.is_blank() && s.top() < limit)
            .collect();
        top.sort_by(|a, b| a.top().total_cmp(&b.top()));

        let mut parts: Vec<&str> = Vec::new();
        let mut last: Option<(f32, f32)> = None;
        for span in top.into_iter().take(opts.max_spans) {
            let text = span.trimmed();
            let mergeable = match last {
                None => true,
                Some((last_y, last_size)) => {
                    span.top() - last_y < opts.max_gap
                        && (span.font_size - last_size).abs() < opts.max_size_delta
                        && patterns::char_len(text) > opts.min_chars
                }
            };
            if !mergeable {
                break;
            }
            parts.push(text);
            last = Some((span.top(), span.font_size));
        }

        if parts.is_empty() {
            opts.fallback.clone()
        } else {
            parts.join(" ")
        }
    }
}

impl Default for StructureAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-blank spans of a document in page order.
fn content_spans(doc: &Document) -> Vec<&Span> {
    doc.spans().filter(|s| !s.is_blank()).collect()
}

/// Font size rounded to a whole point, ties to even.
fn rounded_size(size: f32) -> i64 {
    f64::from(size).round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Page};

    fn span(text: &str, size: f32, y0: f32) -> Span {
        Span::new(text, size, BBox::new(72.0, y0, 400.0, y0 + size))
    }

    fn body_doc(extra: Vec<Span>) -> Document {
        let mut page = Page::letter(0);
        for i in 0..8 {
            page.add_span(span(
                "body text that runs along the page like a paragraph does.",
                12.0,
                300.0 + i as f32 * 14.0,
            ));
        }
        for s in extra {
            page.add_span(s);
        }
        Document::new().with_page(page)
    }

    #[test]
    fn test_bold_large_heading_scores_high() {
        let analyzer = StructureAnalyzer::new();
        let doc = body_doc(vec![span("Introduction", 24.0, 50.0).bold()]);
        let stats = analyzer.statistics(&doc);
        assert_eq!(stats.median_size, 12.0);

        let heading = &doc.pages[0].spans[8];
        let score = analyzer.score_span(heading, &stats);
        // size 0.8 + bold 0.2 = 1.0; position 0.9375; content 0.3 floor
        let expected = 1.0 * 0.5 + 0.9375 * 0.3 + 0.3 * 0.2;
        assert!((score - expected).abs() < 1e-9);

        let outline = analyzer.analyze(&doc);
        assert_eq!(outline.headings.len(), 1);
        assert_eq!(outline.headings[0].text, "Introduction");
        assert_eq!(outline.headings[0].level, HeadingLevel::H1);
    }

    #[test]
    fn test_page_number_is_not_heading() {
        let analyzer = StructureAnalyzer::new();
        let doc = body_doc(vec![span("12", 12.0, 780.0)]);
        let stats = analyzer.statistics(&doc);
        let number = &doc.pages[0].spans[8];
        assert!(analyzer.score_span(number, &stats) < 0.3);
        assert!(analyzer.candidate(number, &stats).is_none());
    }

    #[test]
    fn test_long_text_penalty() {
        let analyzer = StructureAnalyzer::new();
        let stats = StyleStatistics {
            median_size: 12.0,
            significant_sizes: vec![20.0],
        };
        let short = span(&"a".repeat(150), 20.0, 100.0);
        let long = span(&"a".repeat(151), 20.0, 100.0);
        let short_score = analyzer.score_span(&short, &stats);
        let long_score = analyzer.score_span(&long, &stats);
        assert!(long_score < short_score);
        assert!((long_score - short_score * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_continuation_penalty() {
        let analyzer = StructureAnalyzer::new();
        let stats = StyleStatistics {
            median_size: 12.0,
            significant_sizes: vec![],
        };
        let plain = analyzer.score_span(&span("Fresh Herbs", 12.0, 100.0), &stats);
        let trailing = analyzer.score_span(&span("Fresh Herbs,", 12.0, 100.0), &stats);
        assert!((trailing - plain * 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_bold_font_name_boost_is_smaller() {
        let analyzer = StructureAnalyzer::new();
        let stats = StyleStatistics {
            median_size: 12.0,
            significant_sizes: vec![],
        };
        let flag = analyzer.score_span(&span("note", 12.0, 800.0).bold(), &stats);
        let name = analyzer.score_span(&span("note", 12.0, 800.0).with_font("Arial-Bold"), &stats);
        assert!((flag - 0.1).abs() < 1e-9);
        assert!((name - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_three_size_groups_assign_levels() {
        let analyzer = StructureAnalyzer::new();
        let doc = body_doc(vec![
            span("Main Title Heading", 28.0, 40.0).bold(),
            span("Second Level", 22.0, 120.0).bold(),
            span("Third Level", 18.0, 200.0).bold(),
        ]);
        let outline = analyzer.analyze(&doc);
        let levels: Vec<_> = outline
            .headings
            .iter()
            .map(|h| (h.text.as_str(), h.level))
            .collect();
        assert_eq!(
            levels,
            vec![
                ("Main Title Heading", HeadingLevel::H1),
                ("Second Level", HeadingLevel::H2),
                ("Third Level", HeadingLevel::H3),
            ]
        );
    }

    #[test]
    fn test_fourth_size_group_is_dropped() {
        let analyzer = StructureAnalyzer::new();
        let doc = body_doc(vec![
            span("Alpha Heading", 30.0, 40.0).bold(),
            span("Beta Heading", 26.0, 80.0).bold(),
            span("Gamma Heading", 22.0, 120.0).bold(),
            span("Delta Heading", 18.0, 160.0).bold(),
        ]);
        let outline = analyzer.analyze(&doc);
        assert_eq!(outline.headings.len(), 3);
        assert!(outline.headings.iter().all(|h| h.text != "Delta Heading"));
    }

    #[test]
    fn test_uniform_size_uses_percentile_split() {
        let analyzer = StructureAnalyzer::new();
        let mut page = Page::letter(0);
        for (i, text) in ["ALPHA", "BRAVO", "CHARLIE", "DELTA"].iter().enumerate() {
            page.add_span(span(text, 12.0, 10.0 + i as f32 * 40.0).bold());
        }
        let doc = Document::new().with_page(page);
        let outline = analyzer.analyze(&doc);

        // scores decrease top-down: 4 candidates -> 2 x H1 (i < 1.2), 1 x H2 (i < 2.4), rest H3
        let levels: Vec<_> = outline.headings.iter().map(|h| h.level).collect();
        assert_eq!(
            levels,
            vec![
                HeadingLevel::H1,
                HeadingLevel::H1,
                HeadingLevel::H2,
                HeadingLevel::H3
            ]
        );
    }

    #[test]
    fn test_dedup_and_filters() {
        let analyzer = StructureAnalyzer::new();
        let mut doc = Document::new();
        for index in 0..4 {
            let mut page = Page::letter(index);
            for i in 0..6 {
                page.add_span(span("plain body text of the page.", 12.0, 400.0 + i as f32 * 14.0));
            }
            doc.add_page(page);
        }
        doc.pages[1].add_span(span("Overview", 24.0, 60.0).bold());
        doc.pages[3].add_span(span("OVERVIEW", 24.0, 60.0).bold());
        doc.pages[2].add_span(span("Page 7", 24.0, 60.0).bold());
        doc.pages[2].add_span(span("Ok", 24.0, 90.0).bold());
        doc.pages[2].add_span(span("Updated 12/05/2023", 24.0, 120.0).bold());

        let outline = analyzer.analyze(&doc);
        let texts: Vec<_> = outline.headings.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["Overview"]);
        assert_eq!(outline.headings[0].page_index, 1);
    }

    #[test]
    fn test_heading_cap() {
        let analyzer = StructureAnalyzer::with_options(StructureOptions::new().with_max_headings(5));
        let mut page = Page::letter(0);
        for i in 0..20 {
            page.add_span(span(&format!("Heading Number {}", i), 12.0, 10.0).bold());
        }
        let outline = analyzer.analyze(&Document::new().with_page(page));
        assert_eq!(outline.headings.len(), 5);
    }

    #[test]
    fn test_parallel_scoring_matches_sequential() {
        let doc = body_doc(vec![
            span("Introduction", 24.0, 50.0).bold(),
            span("1. Scope", 18.0, 150.0),
            span("Background Material", 16.0, 250.0).bold(),
        ]);
        let sequential = StructureAnalyzer::new().analyze(&doc);
        let parallel =
            StructureAnalyzer::with_options(StructureOptions::new().with_parallel(true)).analyze(&doc);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_empty_document() {
        let outline = StructureAnalyzer::new().analyze(&Document::new());
        assert_eq!(outline.title, "Untitled Document");
        assert!(outline.headings.is_empty());
    }

    #[test]
    fn test_title_from_metadata() {
        let doc = body_doc(vec![]).with_title("Annual Report");
        assert_eq!(StructureAnalyzer::new().find_title(&doc), "Annual Report");
    }

    #[test]
    fn test_title_merges_top_spans() {
        let mut page = Page::letter(0);
        page.add_span(span("Body paragraph far below", 12.0, 500.0));
        page.add_span(span("Adventures in", 26.0, 60.0));
        page.add_span(span("Southern France", 24.0, 90.0));
        page.add_span(span("by", 12.0, 120.0));
        page.add_span(span("Traveller Guide", 24.0, 150.0));
        let doc = Document::new().with_page(page);

        // "by" breaks the run: size jumps by 12
        assert_eq!(
            StructureAnalyzer::new().find_title(&doc),
            "Adventures in Southern France"
        );
    }

    #[test]
    fn test_title_fallback_when_top_region_empty() {
        let page = Page::letter(0).with_span(span("Low text", 12.0, 600.0));
        let doc = Document::new().with_page(page);
        assert_eq!(StructureAnalyzer::new().find_title(&doc), "Untitled Document");
    }

    #[test]
    fn test_rounded_size_ties_to_even() {
        assert_eq!(rounded_size(12.5), 12);
        assert_eq!(rounded_size(13.5), 14);
        assert_eq!(rounded_size(11.6), 12);
    }
}
