//! Query text from a persona/job pair.

use crate::model::PersonaJob;

/// `"{persona}: {job_to_be_done}"`, with no escaping or normalization.
pub fn build_query(job: &PersonaJob) -> String {
    format!("{}: {}", job.persona, job.job_to_be_done)
}
