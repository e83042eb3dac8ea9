//! Batch analysis of document collections.
//!
//! The driver pulls each document from a [`DocumentSource`], infers its
//! outline, builds sections and ranks the combined sections against the
//! persona query. A document that fails extraction is skipped and reported
//! without aborting the batch.

mod options;
mod pipeline;
mod source;

pub use options::AnalyzeOptions;
pub use pipeline::{AnalysisReport, Analyzer, SkippedDocument};
pub use source::{DocumentSource, MemorySource};
