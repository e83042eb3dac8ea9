//! Section builder.

use super::SpanIndex;
use crate::model::{Document, Heading, Section, Span};

/// Vertical boundary used when the next heading's span cannot be located.
const MISSING_END_Y: f32 = 9999.0;

/// How headings are ordered before section boundaries are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingOrder {
    /// Order by page, then by heading text.
    ///
    /// Two headings on the same page are ordered alphabetically rather than
    /// top-to-bottom, which can swap their sections. Kept as the default so
    /// results stay reproducible against earlier runs.
    #[default]
    PageThenText,

    /// Order by page, then by the located heading's top edge.
    ///
    /// Headings whose span cannot be located sort last on their page.
    PageThenPosition,
}

/// Options for section building.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOptions {
    /// Heading ordering strategy
    pub heading_order: HeadingOrder,

    /// Drop sections with fewer content words than this (0 = keep all)
    pub min_content_words: usize,

    /// End boundary used when the next heading's span is not found
    pub missing_end_y: f32,
}

impl SectionOptions {
    /// Create new section options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading ordering strategy.
    pub fn with_heading_order(mut self, order: HeadingOrder) -> Self {
        self.heading_order = order;
        self
    }

    /// Order same-page headings top-to-bottom.
    pub fn positional(mut self) -> Self {
        self.heading_order = HeadingOrder::PageThenPosition;
        self
    }

    /// Set the minimum number of content words.
    pub fn with_min_content_words(mut self, words: usize) -> Self {
        self.min_content_words = words;
        self
    }
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            heading_order: HeadingOrder::PageThenText,
            min_content_words: 0,
            missing_end_y: MISSING_END_Y,
        }
    }
}

/// Vertical extent of one section.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    start_page: u32,
    start_y: f32,
    end_page: u32,
    end_y: f32,
}

impl Bounds {
    /// Whether a span lies after the section start and before its end.
    fn contains(&self, span: &Span) -> bool {
        let page = span.page_index;
        if page < self.start_page || page > self.end_page {
            return false;
        }
        let after_start = page > self.start_page || span.top() >= self.start_y;
        let before_end = page < self.end_page || span.top() < self.end_y;
        after_start && before_end
    }
}

/// Slices documents into heading-bounded sections.
#[derive(Debug, Clone, Default)]
pub struct SectionBuilder {
    options: SectionOptions,
}

impl SectionBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom options.
    pub fn with_options(options: SectionOptions) -> Self {
        Self { options }
    }

    /// The builder's options.
    pub fn options(&self) -> &SectionOptions {
        &self.options
    }

    /// Build one section per heading.
    ///
    /// A section starts below its heading's span and ends above the next
    /// heading's span, possibly crossing pages; the last section runs to
    /// the end of the document. Overlapping or empty sections caused by
    /// noisy headings are kept as they are.
    pub fn build(&self, document_id: &str, doc: &Document, headings: &[Heading]) -> Vec<Section> {
        if headings.is_empty() {
            return Vec::new();
        }

        let index = SpanIndex::new(doc);
        let ordered = self.order_headings(headings, &index);
        let last_page = doc.last_page_index().unwrap_or(0);

        let sections: Vec<Section> = ordered
            .iter()
            .enumerate()
            .map(|(i, heading)| {
                let start_y = index
                    .lookup(heading.page_index, &heading.text)
                    .map_or(0.0, |s| s.bottom());

                let (end_page, end_y) = match ordered.get(i + 1) {
                    Some(next) => (
                        next.page_index,
                        index
                            .lookup(next.page_index, &next.text)
                            .map_or(self.options.missing_end_y, |s| s.top()),
                    ),
                    None => (last_page, f32::INFINITY),
                };

                let bounds = Bounds {
                    start_page: heading.page_index,
                    start_y,
                    end_page,
                    end_y,
                };
                Section::new(
                    document_id,
                    heading.page_index,
                    heading.text.clone(),
                    collect_content(doc, &bounds),
                )
            })
            .filter(|s| s.word_count() >= self.options.min_content_words)
            .collect();

        log::debug!(
            "{}: {} headings -> {} sections",
            document_id,
            headings.len(),
            sections.len()
        );
        sections
    }

    fn order_headings<'h>(&self, headings: &'h [Heading], index: &SpanIndex<'_>) -> Vec<&'h Heading> {
        let mut ordered: Vec<&Heading> = headings.iter().collect();
        match self.options.heading_order {
            HeadingOrder::PageThenText => {
                ordered.sort_by(|a, b| (a.page_index, &a.text).cmp(&(b.page_index, &b.text)));
            }
            HeadingOrder::PageThenPosition => {
                let top = |h: &Heading| index.lookup(h.page_index, &h.text).map_or(f32::MAX, |s| s.top());
                ordered.sort_by(|a, b| {
                    a.page_index
                        .cmp(&b.page_index)
                        .then_with(|| top(a).total_cmp(&top(b)))
                        .then_with(|| a.text.cmp(&b.text))
                });
            }
        }
        ordered
    }
}

/// Trimmed texts of the spans inside `bounds`, joined with single spaces.
fn collect_content(doc: &Document, bounds: &Bounds) -> String {
    doc.pages
        .iter()
        .filter(|p| p.page_index >= bounds.start_page && p.page_index <= bounds.end_page)
        .flat_map(|p| p.spans.iter())
        .filter(|s| bounds.contains(s))
        .map(|s| s.trimmed())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
