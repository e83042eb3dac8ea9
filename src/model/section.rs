//! Sections and ranking results.

use serde::{Deserialize, Serialize};

/// Content attributed to one heading, bounded by the next heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Identifier of the source document (usually its file name)
    pub document_id: String,

    /// Page the section starts on (0-indexed)
    pub start_page: u32,

    /// Text of the originating heading
    pub title: String,

    /// Span texts between this heading and the next, joined with spaces
    pub content: String,
}

impl Section {
    /// Create a new section.
    pub fn new(
        document_id: impl Into<String>,
        start_page: u32,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            start_page,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Text submitted to the embedder: title followed by content.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }

    /// Number of whitespace-separated words in the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Check if the section has no content.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// A section with its relevance score and rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    /// The ranked section
    pub section: Section,

    /// Similarity score after rule boosts
    pub relevance_score: f32,

    /// 1-based rank, 1 being the most relevant
    pub importance_rank: usize,
}

/// Short excerpt previewing a top-ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionSnippet {
    /// Identifier of the source document
    pub document_id: String,

    /// Page the section starts on (0-indexed)
    pub page_index: u32,

    /// Leading sentences of the section, length-capped
    pub refined_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_text() {
        let section = Section::new("a.pdf", 0, "Intro", "Some words here");
        assert_eq!(section.embedding_text(), "Intro Some words here");
        assert_eq!(section.word_count(), 3);
        assert!(!section.is_empty());
        assert!(Section::new("a.pdf", 0, "Empty", "  ").is_empty());
    }
}
