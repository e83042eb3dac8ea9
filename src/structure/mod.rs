//! Structure inference: title and heading outline from styled spans.

mod analyzer;
mod options;
pub mod patterns;
mod stats;

pub use analyzer::{HeadingCandidate, StructureAnalyzer};
pub use options::{StructureOptions, TitleOptions};
pub use patterns::HeadingPatterns;
pub use stats::StyleStatistics;
