//! Persona input and analysis output types.

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// Who is reading and what they are trying to get done.
///
/// Both fields default to empty strings when absent. Besides plain strings,
/// the `{"role": ...}` and `{"task": ...}` object forms are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaJob {
    #[serde(default, deserialize_with = "text_field")]
    pub persona: String,

    #[serde(default, deserialize_with = "text_field")]
    pub job_to_be_done: String,
}

impl PersonaJob {
    /// Create a persona/job pair.
    pub fn new(persona: impl Into<String>, job_to_be_done: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            job_to_be_done: job_to_be_done.into(),
        }
    }

    /// Parse from JSON text.
    pub fn from_json(data: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextField {
    Plain(String),
    Role { role: String },
    Task { task: String },
}

fn text_field<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextField::deserialize(deserializer)? {
        TextField::Plain(text) => text,
        TextField::Role { role } => role,
        TextField::Task { task } => task,
    })
}

/// Run metadata attached to an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Input document names, in enumeration order
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    /// ISO-8601 generation time
    pub timestamp: String,
}

/// A ranked section entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub document: String,
    pub page_number: usize,
    /// Chunk text truncated to the configured number of characters
    pub section_title: String,
    /// 1-based rank
    pub importance_rank: usize,
}

/// Full text of a ranked chunk, parallel to [`SectionSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub page_number: usize,
    pub refined_text: String,
}

/// The persona-conditioned ranking of a document set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metadata: AnalysisMetadata,
    pub section_summary: Vec<SectionSummary>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl AnalysisResult {
    /// Number of ranked entries.
    pub fn len(&self) -> usize {
        self.section_summary.len()
    }

    /// Check if nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.section_summary.is_empty()
    }
}

/// Format a local time the way the analysis metadata expects it.
pub fn iso_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_persona_job_plain_strings() {
        let pj = PersonaJob::from_json(
            r#"{"persona": "Travel Planner", "job_to_be_done": "Plan a 4-day trip"}"#,
        )
        .unwrap();
        assert_eq!(pj, PersonaJob::new("Travel Planner", "Plan a 4-day trip"));
    }

    #[test]
    fn test_persona_job_object_forms() {
        let pj = PersonaJob::from_json(
            r#"{"persona": {"role": "HR professional"}, "job_to_be_done": {"task": "Create forms"}, "documents": []}"#,
        )
        .unwrap();
        assert_eq!(pj.persona, "HR professional");
        assert_eq!(pj.job_to_be_done, "Create forms");
    }

    #[test]
    fn test_persona_job_missing_fields_default_to_empty() {
        let pj = PersonaJob::from_json("{}").unwrap();
        assert_eq!(pj, PersonaJob::default());
    }

    #[test]
    fn test_persona_job_invalid_json() {
        assert!(matches!(
            PersonaJob::from_json("not json"),
            Err(crate::Error::Json(_))
        ));
    }

    #[test]
    fn test_iso_timestamp_format() {
        let at = Local.with_ymd_and_hms(2024, 7, 1, 9, 30, 5).unwrap();
        assert_eq!(iso_timestamp(at), "2024-07-01T09:30:05.000000");
    }
}
