//! Document-level types.

use super::{Page, Span};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// An extracted document: pages of positioned, styled spans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Title from document metadata (empty when unknown)
    #[serde(default)]
    pub title: String,

    /// Total number of pages reported by the extractor
    #[serde(default)]
    pub total_pages: u32,

    /// Pages in the document, ordered by index
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder form of [`Document::add_page`].
    pub fn with_page(mut self, page: Page) -> Self {
        self.add_page(page);
        self
    }

    /// Add a page to the document, stamping its spans with the page index.
    pub fn add_page(&mut self, mut page: Page) {
        let index = page.page_index;
        for span in &mut page.spans {
            span.page_index = index;
        }
        self.pages.push(page);
        self.total_pages = self.total_pages.max(self.pages.len() as u32);
    }

    /// Parse an extraction payload from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Document = serde_json::from_str(json)?;
        Ok(doc.normalized())
    }

    /// Parse an extraction payload from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: Document = serde_json::from_reader(reader)?;
        Ok(doc.normalized())
    }

    /// Order pages by index and stamp each span with its page index.
    pub fn normalized(mut self) -> Self {
        self.pages.sort_by_key(|p| p.page_index);
        for page in &mut self.pages {
            let index = page.page_index;
            for span in &mut page.spans {
                span.page_index = index;
            }
        }
        self.total_pages = self.total_pages.max(self.pages.len() as u32);
        self
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by index (0-indexed).
    pub fn get_page(&self, page_index: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_index == page_index)
    }

    /// Index of the last page, if any.
    pub fn last_page_index(&self) -> Option<u32> {
        self.pages.iter().map(|p| p.page_index).max()
    }

    /// Iterate over every span in page order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.pages.iter().flat_map(|p| p.spans.iter())
    }

    /// Check if the document has no spans at all.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.is_empty())
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
