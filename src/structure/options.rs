//! Structure inference options and tunable thresholds.

use crate::error::{Error, Result};

/// Options for the structure inference engine.
///
/// Every threshold of the heading heuristic lives here so behaviour can be
/// tuned without touching the scoring code.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureOptions {
    /// Weight of the font size signal in the composite score
    pub style_weight: f64,

    /// Weight of the vertical position signal
    pub position_weight: f64,

    /// Weight of the text shape signal
    pub content_weight: f64,

    /// Sizes above `median * significance_ratio` may be headings
    pub significance_ratio: f64,

    /// Size score is `size / (median * size_normalization)`, capped at 1
    pub size_normalization: f64,

    /// Sizes above `median * large_size_ratio` earn the short-line floor
    pub large_size_ratio: f64,

    /// Size score bonus for the bold style flag
    pub bold_flag_boost: f64,

    /// Size score bonus for a bold font name (when the flag is absent)
    pub bold_font_boost: f64,

    /// Page height used to normalise the vertical position
    pub position_normalization: f64,

    /// Spans must score strictly above this to become candidates
    pub candidate_threshold: f64,

    /// Texts longer than this many characters are penalised
    pub long_text_chars: usize,

    /// Multiplier for long texts
    pub long_text_penalty: f64,

    /// Multiplier for texts ending in a continuation marker
    pub continuation_penalty: f64,

    /// Multiplier for purely numeric texts
    pub numeric_penalty: f64,

    /// Maximum number of headings kept in the outline
    pub max_headings: usize,

    /// Headings shorter than this many characters are dropped
    pub min_heading_chars: usize,

    /// Fraction of candidates (by score) that become H1 in the percentile split
    pub h1_fraction: f64,

    /// Cumulative fraction that becomes H1 or H2 in the percentile split
    pub h2_fraction: f64,

    /// Title detection settings
    pub title: TitleOptions,

    /// Also treat CJK/Hiragana/Katakana line openings as heading-shaped
    pub multilingual: bool,

    /// Score spans on the rayon pool
    pub parallel: bool,
}

impl StructureOptions {
    /// Create new structure options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate score threshold.
    pub fn with_candidate_threshold(mut self, threshold: f64) -> Self {
        self.candidate_threshold = threshold;
        self
    }

    /// Set the page height used for position scoring.
    pub fn with_position_normalization(mut self, height: f64) -> Self {
        self.position_normalization = height;
        self
    }

    /// Set the heading significance ratio.
    pub fn with_significance_ratio(mut self, ratio: f64) -> Self {
        self.significance_ratio = ratio;
        self
    }

    /// Set the maximum number of headings.
    pub fn with_max_headings(mut self, max: usize) -> Self {
        self.max_headings = max;
        self
    }

    /// Set the scoring weights (style, position, content).
    pub fn with_weights(mut self, style: f64, position: f64, content: f64) -> Self {
        self.style_weight = style;
        self.position_weight = position;
        self.content_weight = content;
        self
    }

    /// Set title detection options.
    pub fn with_title_options(mut self, title: TitleOptions) -> Self {
        self.title = title;
        self
    }

    /// Enable or disable script-range heading patterns.
    pub fn with_multilingual(mut self, multilingual: bool) -> Self {
        self.multilingual = multilingual;
        self
    }

    /// Enable or disable parallel span scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel span scoring.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check that every threshold is usable by the scoring code.
    pub fn validate(&self) -> Result<()> {
        let divisors = [
            ("position_normalization", self.position_normalization),
            ("size_normalization", self.size_normalization),
            ("significance_ratio", self.significance_ratio),
        ];
        for (name, value) in divisors {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        let weights = [
            ("style_weight", self.style_weight),
            ("position_weight", self.position_weight),
            ("content_weight", self.content_weight),
        ];
        for (name, value) in weights {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("{} must be non-negative, got {}", name, value)));
            }
        }

        if !(0.0..=1.0).contains(&self.h1_fraction)
            || !(0.0..=1.0).contains(&self.h2_fraction)
            || self.h1_fraction > self.h2_fraction
        {
            return Err(invalid(format!(
                "level fractions must satisfy 0 <= h1 <= h2 <= 1, got {} and {}",
                self.h1_fraction, self.h2_fraction
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidOption(message)
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            style_weight: 0.5,
            position_weight: 0.3,
            content_weight: 0.2,
            significance_ratio: 1.2,
            size_normalization: 2.5,
            large_size_ratio: 1.5,
            bold_flag_boost: 0.2,
            bold_font_boost: 0.1,
            position_normalization: 800.0,
            candidate_threshold: 0.3,
            long_text_chars: 150,
            long_text_penalty: 0.5,
            continuation_penalty: 0.7,
            numeric_penalty: 0.3,
            max_headings: 50,
            min_heading_chars: 3,
            h1_fraction: 0.3,
            h2_fraction: 0.6,
            title: TitleOptions::default(),
            multilingual: false,
            parallel: false,
        }
    }
}

/// Options for inferring a title from the first page.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleOptions {
    /// Only spans whose top lies in this fraction of the page height qualify
    pub top_region: f32,

    /// Page height assumed when the page reports none
    pub default_page_height: f32,

    /// At most this many top spans are inspected
    pub max_spans: usize,

    /// Maximum vertical distance between merged spans
    pub max_gap: f32,

    /// Maximum font size difference between merged spans
    pub max_size_delta: f32,

    /// Merged continuation spans must be longer than this many characters
    pub min_chars: usize,

    /// Title used when nothing qualifies
    pub fallback: String,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            top_region: 0.25,
            default_page_height: 800.0,
            max_spans: 5,
            max_gap: 50.0,
            max_size_delta: 4.0,
            min_chars: 3,
            fallback: "Untitled Document".to_string(),
        }
    }
}
