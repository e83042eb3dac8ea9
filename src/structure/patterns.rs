//! Text shape predicates used by heading scoring and outline cleanup.

use regex::{Regex, RegexSet};

/// Heading-shaped line patterns for Latin-script documents.
const HEADING_PATTERNS: &[&str] = &[
    r"^[A-Z][A-Z\s]{2,}$",        // ALL CAPS
    r"^\d+\.?\s+[A-Z]",           // 1. Introduction
    r"^[IVX]+\.?\s+[A-Z]",        // I. Overview
    r"^(Chapter|Section)\s+\d+",  // Chapter 1
    r"^\d+\.\d+\.?\s+",           // 1.1 Subsection
    r"^\d+\.\d+\.\d+\.?\s+",      // 1.1.1 Sub-subsection
    r"^[A-Z]\.\s+",               // A. Section
    r"^(Appendix|Annex)\s+[A-Z]", // Appendix A
];

/// Coarse script-range patterns (CJK ideographs, Hiragana, Katakana).
const SCRIPT_PATTERNS: &[&str] = &[
    r"^[\x{4e00}-\x{9fff}]+",
    r"^[\x{3040}-\x{309f}]+",
    r"^[\x{30a0}-\x{30ff}]+",
];

/// Compiled patterns for heading detection and outline filtering.
#[derive(Debug, Clone)]
pub struct HeadingPatterns {
    heading_shapes: RegexSet,
    numeric_only: Regex,
    page_number: Regex,
    date_like: Regex,
}

impl HeadingPatterns {
    /// Compile the pattern tables.
    ///
    /// With `multilingual` set, lines opening with CJK, Hiragana or
    /// Katakana runs also count as heading-shaped.
    pub fn new(multilingual: bool) -> Self {
        let mut shapes: Vec<&str> = HEADING_PATTERNS.to_vec();
        if multilingual {
            shapes.extend_from_slice(SCRIPT_PATTERNS);
        }

        Self {
            heading_shapes: RegexSet::new(shapes).unwrap(),
            numeric_only: Regex::new(r"^[\d\s\-\./]+$").unwrap(),
            page_number: Regex::new(r"^(page\s+)?\d+$").unwrap(),
            date_like: Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}").unwrap(),
        }
    }

    /// Whether the text matches any heading-shaped pattern.
    pub fn is_heading_shaped(&self, text: &str) -> bool {
        self.heading_shapes.is_match(text)
    }

    /// Whether the text consists only of digits, whitespace, dashes, dots and slashes.
    pub fn is_numeric_only(&self, text: &str) -> bool {
        self.numeric_only.is_match(text)
    }

    /// Whether the lowercase text is a bare page number ("12", "page 12").
    pub fn is_page_number(&self, lowercase: &str) -> bool {
        self.page_number.is_match(lowercase)
    }

    /// Whether the text contains a date-like substring ("12/03/2024").
    pub fn contains_date(&self, text: &str) -> bool {
        self.date_like.is_match(text)
    }
}

impl Default for HeadingPatterns {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length in characters, not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// True when the text has at least one cased letter and no lowercase letters.
pub fn is_all_caps(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// True when every word starts with an uppercase letter followed only by
/// lowercase letters, and the text has at least one cased letter.
///
/// Uncased characters (digits, punctuation, spaces) reset the word, so
/// "Rock-And-Roll" and "Part 2 Overview" are title case.
pub fn is_title_case(text: &str) -> bool {
    let mut cased = false;
    let mut prev_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            cased = true;
        } else {
            prev_cased = false;
        }
    }
    cased
}

/// Whether the right-trimmed text ends with a continuation marker
/// (`,` `;` `and` `or`), suggesting a sentence fragment.
pub fn ends_with_continuation(text: &str) -> bool {
    let trimmed = text.trim_end();
    [",", ";", "and", "or"]
        .iter()
        .any(|suffix| trimmed.ends_with(suffix))
}
