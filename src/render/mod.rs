//! Rendering module for analysis output.

mod json;
mod output;

pub use json::{to_json, JsonFormat};
pub use output::{AnalysisOutput, ExtractedSection, OutputMetadata, SubsectionAnalysis};
