use serde::{Deserialize, Serialize};

/// Run metadata carried in the output artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String, // RFC 3339
}

/// One ranked section title in the output artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub page_number: u32,
    pub section_title: String,
    pub importance_rank: u32,
}

/// One ranked refined subsection in the output artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub page_number: u32,
    pub refined_text: String,
    pub importance_rank: u32,
}

/// The complete output artifact written at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightOutput {
    pub metadata: RunMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}
