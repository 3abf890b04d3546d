// Resume screening pipeline: extract → prompt → model call → parse →
// categorize → archive, plus the run controller that sequences a batch.
// All model calls go through llm_client via the Analyzer seam — no direct
// API calls here.

pub mod analyzer;
pub mod archive;
pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod runner;
pub mod score;

use thiserror::Error;

/// Pipeline failures. `Extraction`, `Upstream`, and `Parse` are per-resume:
/// the run loop logs them with the applicant identity and continues with the
/// rest of the batch. `Archive` and `Io` abort the whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("PDF text extraction failed: {0}")]
    Extraction(String),

    #[error("upstream model call failed: {0}")]
    Upstream(#[from] crate::llm_client::LlmError),

    #[error("unparseable model response: {0}")]
    Parse(String),

    #[error("archive write failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
