//! Persona-conditioned relevance ranking.
//!
//! Every non-empty line of every input document becomes a chunk. Chunks are
//! embedded together with a query built from the persona and job, scored
//! by cosine similarity, and the best [`RankOptions::top_k`] are reported.

mod assemble;
mod chunker;
mod query;
mod ranker;

pub use assemble::{truncate_chars, ResultAssembler};
pub use chunker::ChunkExtractor;
pub use query::build_query;
pub use ranker::EmbeddingRanker;

use chrono::Local;

use crate::config::{document_name, load_persona_job, RunConfig};
use crate::embed::Embedder;
use crate::error::{Error, Result, Stage};
use crate::model::{iso_timestamp, AnalysisResult, PersonaJob};
use crate::options::{ErrorMode, RankOptions};
use crate::source::{PdfSpanSource, SpanSource};

/// Runs the ranking pipeline with an injected embedder.
pub struct Analyzer {
    embedder: Box<dyn Embedder>,
    options: RankOptions,
}

impl Analyzer {
    /// Create an analyzer with default options.
    pub fn new(embedder: Box<dyn Embedder>) -> Self {
        Self {
            embedder,
            options: RankOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: RankOptions) -> Self {
        self.options = options;
        self
    }

    /// Access the embedder.
    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder.as_ref()
    }

    /// Access the options.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Rank the lines of named documents against a persona/job.
    ///
    /// Fails with [`Error::MissingInput`] before reading anything when `job`
    /// is absent. Documents that fail to read abort the run in strict mode
    /// and are skipped (and left out of `input_documents`) in lenient mode.
    pub fn analyze<S: SpanSource>(
        &self,
        documents: &[(String, S)],
        job: Option<&PersonaJob>,
        timestamp: impl Into<String>,
    ) -> Result<AnalysisResult> {
        let job = job.ok_or_else(|| Error::MissingInput("persona/job description".to_string()))?;

        let extractor = ChunkExtractor;
        let mut input_documents = Vec::with_capacity(documents.len());
        let mut chunks = Vec::new();
        for (name, source) in documents {
            match extractor.extract(name, source) {
                Ok(doc_chunks) => {
                    input_documents.push(name.clone());
                    chunks.extend(doc_chunks);
                }
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping '{}': {}", name, e);
                }
                Err(e) => return Err(e.for_document(Stage::Chunking, name.as_str())),
            }
        }

        let query = build_query(job);
        log::debug!("query: {:?}", query);

        let ranker = EmbeddingRanker::new(self.embedder.as_ref(), self.options.top_k);
        let ranked = ranker.rank(chunks, &query)?;

        Ok(ResultAssembler::new(self.options.title_chars).assemble(
            input_documents,
            job,
            timestamp.into(),
            ranked,
        ))
    }

    /// Run the pipeline over the PDFs and persona file of a run config.
    pub fn analyze_run(&self, config: &RunConfig) -> Result<AnalysisResult> {
        let persona_path = config
            .persona_path
            .as_deref()
            .ok_or_else(|| Error::MissingInput("persona/job JSON file".to_string()))?;
        let job = load_persona_job(persona_path)?;

        let mut documents = Vec::with_capacity(config.input_paths.len());
        for path in &config.input_paths {
            let name = document_name(path);
            match PdfSpanSource::open(path) {
                Ok(source) => {
                    documents.push((name, source.with_error_mode(self.options.error_mode)));
                }
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping '{}': {}", name, e);
                }
                Err(e) => return Err(e.for_document(Stage::Chunking, name)),
            }
        }

        self.analyze(&documents, Some(&job), iso_timestamp(Local::now()))
    }
}
