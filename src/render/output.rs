//! Analysis output contract.
//!
//! Field names here are consumed by downstream tooling and must not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{RankedSection, SubsectionSnippet};
use crate::rank::Ranking;

/// Complete result of analysing a document collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    /// Run metadata
    pub metadata: OutputMetadata,

    /// Ranked sections, most relevant first
    pub extracted_sections: Vec<ExtractedSection>,

    /// Refined snippets of the top-ranked sections
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Metadata describing one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMetadata {
    /// Identifiers of the documents submitted, in input order
    pub input_documents: Vec<String>,

    /// Persona the ranking was performed for
    pub persona: String,

    /// Task the persona wants to accomplish
    pub job_to_be_done: String,

    /// When the analysis ran
    pub processing_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: usize,
    /// 1-based page number
    pub page_number: u32,
}

impl From<&RankedSection> for ExtractedSection {
    fn from(ranked: &RankedSection) -> Self {
        Self {
            document: ranked.section.document_id.clone(),
            section_title: ranked.section.title.clone(),
            importance_rank: ranked.importance_rank,
            page_number: ranked.section.start_page + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    /// 1-based page number
    pub page_number: u32,
}

impl From<&SubsectionSnippet> for SubsectionAnalysis {
    fn from(snippet: &SubsectionSnippet) -> Self {
        Self {
            document: snippet.document_id.clone(),
            refined_text: snippet.refined_text.clone(),
            page_number: snippet.page_index + 1,
        }
    }
}

impl AnalysisOutput {
    /// Assemble the output for a ranking.
    pub fn new(
        input_documents: Vec<String>,
        persona: impl Into<String>,
        job_to_be_done: impl Into<String>,
        processing_timestamp: DateTime<Utc>,
        ranking: &Ranking,
    ) -> Self {
        Self {
            metadata: OutputMetadata {
                input_documents,
                persona: persona.into(),
                job_to_be_done: job_to_be_done.into(),
                processing_timestamp,
            },
            extracted_sections: ranking.sections.iter().map(ExtractedSection::from).collect(),
            subsection_analysis: ranking.snippets.iter().map(SubsectionAnalysis::from).collect(),
        }
    }

    /// Check if no section was ranked.
    pub fn is_empty(&self) -> bool {
        self.extracted_sections.is_empty()
    }
}
