//! Document sources: the seam to the extraction collaborator.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::Document;

/// Produces extracted documents by identifier.
///
/// Implement this trait to plug in a PDF extractor. Failures are reported
/// per document; the batch driver skips the document and carries on.
pub trait DocumentSource: Send + Sync {
    /// Extract the document with the given identifier.
    fn extract(&self, id: &str) -> Result<Document>;

    /// Name of this source, for logging.
    fn name(&self) -> &str {
        "source"
    }
}

/// In-memory source over pre-extracted documents.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, Document>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under an identifier.
    pub fn insert(&mut self, id: impl Into<String>, document: Document) {
        self.documents.insert(id.into(), document);
    }

    /// Builder form of [`MemorySource::insert`].
    pub fn with_document(mut self, id: impl Into<String>, document: Document) -> Self {
        self.insert(id, document);
        self
    }

    /// Register a document parsed from an extraction payload.
    pub fn insert_json(&mut self, id: impl Into<String>, json: &str) -> Result<()> {
        let document = Document::from_json(json)?;
        self.insert(id, document);
        Ok(())
    }

    /// Check if a document is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if no documents are registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentSource for MemorySource {
    fn extract(&self, id: &str) -> Result<Document> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

impl<S: Into<String>> FromIterator<(S, Document)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (S, Document)>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().map(|(id, doc)| (id.into(), doc)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new().with_document("a.pdf", Document::new().with_title("A"));
        assert!(source.contains("a.pdf"));
        assert_eq!(source.len(), 1);
        assert_eq!(source.extract("a.pdf").unwrap().title, "A");
        assert!(matches!(
            source.extract("missing.pdf"),
            Err(Error::DocumentNotFound(id)) if id == "missing.pdf"
        ));
    }

    #[test]
    fn test_insert_json() {
        let mut source = MemorySource::new();
        source
            .insert_json("b.pdf", r#"{"title": "B", "pages": []}"#)
            .unwrap();
        assert_eq!(source.extract("b.pdf").unwrap().title, "B");
        assert!(source.insert_json("c.pdf", "{not json").is_err());
        assert!(!source.contains("c.pdf"));
    }

    #[test]
    fn test_from_iterator() {
        let source: MemorySource = vec![("x.pdf", Document::new()), ("y.pdf", Document::new())]
            .into_iter()
            .collect();
        assert_eq!(source.len(), 2);
    }
}
