//! Refined snippet extraction.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Extracts a short preview from section content.
#[derive(Debug, Clone)]
pub struct SnippetExtractor {
    sentences: usize,
    max_chars: usize,
    boundary: Regex,
}

impl SnippetExtractor {
    /// Create an extractor keeping `sentences` leading sentences, capped at
    /// `max_chars` characters.
    pub fn new(sentences: usize, max_chars: usize) -> Self {
        Self {
            sentences,
            max_chars,
            boundary: Regex::new(r"[.!?]\s+").unwrap(),
        }
    }

    /// Leading sentences of `content` with whitespace collapsed.
    ///
    /// Sentences end at `.`, `!` or `?` followed by whitespace; the
    /// punctuation stays with its sentence.
    pub fn extract(&self, content: &str) -> String {
        if self.sentences == 0 {
            return String::new();
        }

        let end = self
            .boundary
            .find_iter(content)
            .nth(self.sentences - 1)
            .map_or(content.len(), |m| m.start() + 1);

        let collapsed = content[..end]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        collapsed.nfc().take(self.max_chars).collect()
    }
}

impl Default for SnippetExtractor {
    fn default() -> Self {
        Self::new(2, 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_two_sentences() {
        let extractor = SnippetExtractor::default();
        let text = "First sentence here.  Second one!\nThird? Fourth.";
        assert_eq!(extractor.extract(text), "First sentence here. Second one!");
    }

    #[test]
    fn test_short_content_kept_whole() {
        let extractor = SnippetExtractor::default();
        assert_eq!(extractor.extract("  only   one\tsentence "), "only one sentence");
        assert_eq!(extractor.extract("Version 2.1 released."), "Version 2.1 released.");
        assert_eq!(extractor.extract(""), "");
    }

    #[test]
    fn test_truncates_to_max_chars() {
        let extractor = SnippetExtractor::default();
        let long = "é".repeat(800);
        let snippet = extractor.extract(&long);
        assert_eq!(snippet.chars().count(), 500);

        let tight = SnippetExtractor::new(2, 10);
        assert_eq!(tight.extract("Abcdefghijklmnop. Q."), "Abcdefghij");
    }

    #[test]
    fn test_zero_sentences() {
        assert_eq!(SnippetExtractor::new(0, 500).extract("Some text. More."), "");
    }
}
