//! Ranking options.

use super::RuleSet;
use crate::error::{Error, Result};

/// Options for relevance ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankOptions {
    /// Candidates kept after similarity scoring, before rules
    pub candidate_pool: usize,

    /// Ranked sections returned
    pub max_sections: usize,

    /// Snippets extracted from the top-ranked sections
    pub max_snippets: usize,

    /// Leading sentences kept in a snippet
    pub snippet_sentences: usize,

    /// Maximum snippet length in characters
    pub snippet_chars: usize,

    /// Exclusion and boost rules
    pub rules: RuleSet,
}

impl RankOptions {
    /// Create new rank options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate pool size.
    pub fn with_candidate_pool(mut self, size: usize) -> Self {
        self.candidate_pool = size;
        self
    }

    /// Set the number of ranked sections returned.
    pub fn with_max_sections(mut self, max: usize) -> Self {
        self.max_sections = max;
        self
    }

    /// Set the number of snippets extracted.
    pub fn with_max_snippets(mut self, max: usize) -> Self {
        self.max_snippets = max;
        self
    }

    /// Set snippet length limits.
    pub fn with_snippet_limits(mut self, sentences: usize, chars: usize) -> Self {
        self.snippet_sentences = sentences;
        self.snippet_chars = chars;
        self
    }

    /// Set the rule set.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Disable all exclusion and boost rules.
    pub fn without_rules(mut self) -> Self {
        self.rules = RuleSet::empty();
        self
    }

    /// Check that every boost factor is a finite positive multiplier.
    pub fn validate(&self) -> Result<()> {
        if let Some(rule) = self
            .rules
            .boosts
            .iter()
            .find(|b| !(b.factor.is_finite() && b.factor > 0.0))
        {
            return Err(Error::InvalidOption(format!(
                "boost factor for {:?} must be positive, got {}",
                rule.keywords, rule.factor
            )));
        }
        Ok(())
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            candidate_pool: 100,
            max_sections: 5,
            max_snippets: 5,
            snippet_sentences: 2,
            snippet_chars: 500,
            rules: RuleSet::default(),
        }
    }
}
