//! Analysis result assembly.

use crate::model::{
    AnalysisMetadata, AnalysisResult, PersonaJob, ScoredChunk, SectionSummary, SubsectionAnalysis,
};

/// Builds the ranked section lists and run metadata.
#[derive(Debug, Clone, Copy)]
pub struct ResultAssembler {
    title_chars: usize,
}

impl ResultAssembler {
    /// Create an assembler truncating section titles to `title_chars`.
    pub fn new(title_chars: usize) -> Self {
        Self { title_chars }
    }

    pub fn assemble(
        &self,
        input_documents: Vec<String>,
        job: &PersonaJob,
        timestamp: String,
        ranked: Vec<ScoredChunk>,
    ) -> AnalysisResult {
        let mut section_summary = Vec::with_capacity(ranked.len());
        let mut subsection_analysis = Vec::with_capacity(ranked.len());

        for (position, scored) in ranked.into_iter().enumerate() {
            let chunk = scored.chunk;
            section_summary.push(SectionSummary {
                document: chunk.document.clone(),
                page_number: chunk.page,
                section_title: truncate_chars(&chunk.text, self.title_chars).to_string(),
                importance_rank: position + 1,
            });
            subsection_analysis.push(SubsectionAnalysis {
                document: chunk.document,
                page_number: chunk.page,
                refined_text: chunk.text,
            });
        }

        AnalysisResult {
            metadata: AnalysisMetadata {
                input_documents,
                persona: job.persona.clone(),
                job_to_be_done: job.job_to_be_done.clone(),
                timestamp,
            },
            section_summary,
            subsection_analysis,
        }
    }
}

/// The first `max_chars` characters of `text`, with no suffix.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
