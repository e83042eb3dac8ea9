//! Font size statistics for heading detection.

use crate::model::Span;

/// Font size statistics over a document's spans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleStatistics {
    /// Median font size (body text estimate)
    pub median_size: f64,
    /// Distinct sizes large enough to be headings, largest first
    pub significant_sizes: Vec<f32>,
}

impl StyleStatistics {
    /// Compute statistics over the given spans.
    ///
    /// A size is significant when it is strictly greater than
    /// `median * significance_ratio`.
    pub fn from_spans<'a, I>(spans: I, significance_ratio: f64) -> Self
    where
        I: IntoIterator<Item = &'a Span>,
    {
        let mut sizes: Vec<f32> = spans.into_iter().map(|s| s.font_size).collect();
        if sizes.is_empty() {
            return Self::default();
        }

        sizes.sort_by(|a, b| a.total_cmp(b));
        let median_size = median_of_sorted(&sizes);

        let cutoff = median_size * significance_ratio;
        let mut significant_sizes: Vec<f32> = sizes
            .iter()
            .copied()
            .filter(|s| f64::from(*s) > cutoff)
            .collect();
        significant_sizes.dedup();
        significant_sizes.reverse();

        Self {
            median_size,
            significant_sizes,
        }
    }

    /// Whether a size is in the significant set.
    pub fn is_significant(&self, size: f32) -> bool {
        self.significant_sizes.iter().any(|s| *s == size)
    }

    /// Largest significant size, if any.
    pub fn largest_significant(&self) -> Option<f32> {
        self.significant_sizes.first().copied()
    }
}

/// Median of an ascending slice; mean of the middle pair for even lengths.
fn median_of_sorted(sorted: &[f32]) -> f64 {
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 1 {
        f64::from(sorted[mid])
    } else {
        (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
    }
}
