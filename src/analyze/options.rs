//! Batch analysis options.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::rank::RankOptions;
use crate::section::SectionOptions;
use crate::structure::StructureOptions;

/// Options for analysing a document collection.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Structure inference options
    pub structure: StructureOptions,

    /// Section building options
    pub sections: SectionOptions,

    /// Ranking options
    pub rank: RankOptions,

    /// Process documents on the rayon pool
    pub parallel: bool,

    /// Fixed processing timestamp (defaults to the current time)
    pub timestamp: Option<DateTime<Utc>>,
}

impl AnalyzeOptions {
    /// Create new analyze options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set structure inference options.
    pub fn with_structure(mut self, options: StructureOptions) -> Self {
        self.structure = options;
        self
    }

    /// Set section building options.
    pub fn with_sections(mut self, options: SectionOptions) -> Self {
        self.sections = options;
        self
    }

    /// Set ranking options.
    pub fn with_rank(mut self, options: RankOptions) -> Self {
        self.rank = options;
        self
    }

    /// Enable or disable per-document parallelism.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Use a fixed processing timestamp for reproducible output.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Check the structure and ranking options.
    pub fn validate(&self) -> Result<()> {
        self.structure.validate()?;
        self.rank.validate()
    }
}
