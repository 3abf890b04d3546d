//! The model seam the run loop talks to.
//!
//! Carried in `AppState` as `Arc<dyn Analyzer>` so handlers and the runner
//! never name a concrete backend, and tests can substitute canned responses
//! without a network.

use async_trait::async_trait;

use crate::llm_client::{ChatMessage, LlmClient};
use crate::pipeline::PipelineError;

#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Sends one user prompt to the named model and returns the raw
    /// completion text.
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, PipelineError>;
}

/// Production backend: a single chat-completion call at temperature 0.
pub struct LlmAnalyzer {
    llm: LlmClient,
}

impl LlmAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Analyzer for LlmAnalyzer {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, PipelineError> {
        let messages = [ChatMessage::user(prompt)];
        Ok(self.llm.chat(model, &messages).await?)
    }
}
