//! Per-document lookup from (page, text) to span.

use std::collections::HashMap;

use crate::model::{Document, Span};

/// Lookup from page index and trimmed span text to the first matching span.
///
/// Built once per document so heading boundaries resolve without
/// rescanning every page.
#[derive(Debug, Default)]
pub struct SpanIndex<'a> {
    pages: HashMap<u32, HashMap<&'a str, &'a Span>>,
}

impl<'a> SpanIndex<'a> {
    /// Index every non-blank span of the document.
    ///
    /// When several spans on a page share the same text, the first one in
    /// page order wins.
    pub fn new(doc: &'a Document) -> Self {
        let mut pages: HashMap<u32, HashMap<&'a str, &'a Span>> = HashMap::new();
        for page in &doc.pages {
            let by_text = pages.entry(page.page_index).or_default();
            for span in &page.spans {
                let text = span.trimmed();
                if !text.is_empty() {
                    by_text.entry(text).or_insert(span);
                }
            }
        }
        Self { pages }
    }

    /// Span on `page_index` whose trimmed text equals `text`.
    pub fn lookup(&self, page_index: u32, text: &str) -> Option<&'a Span> {
        self.pages
            .get(&page_index)
            .and_then(|by_text| by_text.get(text.trim()))
            .copied()
    }

    /// Number of indexed pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
