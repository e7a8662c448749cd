//! Data model shared by the outline and ranking pipelines.
//!
//! Every type here is a plain value owned by the stage that produced it.
//! Page indices are 0-based throughout.

mod analysis;
mod chunk;
mod outline;
mod span;

pub use analysis::{
    iso_timestamp, AnalysisMetadata, AnalysisResult, PersonaJob, SectionSummary,
    SubsectionAnalysis,
};
pub use chunk::{Chunk, ScoredChunk};
pub use outline::{Heading, HeadingLevel, Outline};
pub use span::{Block, Line, PageLayout, Span};
