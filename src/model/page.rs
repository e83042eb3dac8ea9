//! Page-level types.

use super::Span;
use serde::{Deserialize, Serialize};

/// A single page of extracted content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page index (0-indexed)
    pub page_index: u32,

    /// Page width in points (1 point = 1/72 inch)
    #[serde(default)]
    pub width: f32,

    /// Page height in points
    #[serde(default)]
    pub height: f32,

    /// Concatenated page text as reported by the extractor
    #[serde(default)]
    pub raw_text: String,

    /// Styled spans on the page
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(page_index: u32, width: f32, height: f32) -> Self {
        Self {
            page_index,
            width,
            height,
            raw_text: String::new(),
            spans: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter(page_index: u32) -> Self {
        Self::new(page_index, 612.0, 792.0)
    }

    /// Create a new page with standard A4 size (210 x 297 mm).
    pub fn a4(page_index: u32) -> Self {
        Self::new(page_index, 595.0, 842.0)
    }

    /// Add a span to the page, stamping it with this page's index.
    pub fn add_span(&mut self, mut span: Span) {
        span.page_index = self.page_index;
        self.spans.push(span);
    }

    /// Builder form of [`Page::add_span`].
    pub fn with_span(mut self, span: Span) -> Self {
        self.add_span(span);
        self
    }

    /// Set the raw page text.
    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = raw_text.into();
        self
    }

    /// Plain text of the page.
    ///
    /// Falls back to joining span texts when the extractor did not
    /// supply raw text.
    pub fn plain_text(&self) -> String {
        if !self.raw_text.trim().is_empty() {
            return self.raw_text.clone();
        }
        self.spans
            .iter()
            .map(|s| s.trimmed())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the page has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::letter(0)
    }
}
