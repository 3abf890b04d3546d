use std::sync::Arc;

use crate::config::Config;
use crate::pipeline::analyzer::Analyzer;
use crate::runs::RunRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The model seam. Production: `LlmAnalyzer`. Tests swap in canned backends.
    pub analyzer: Arc<dyn Analyzer>,
    /// Live and finished screening runs; nothing persists across restarts.
    pub runs: RunRegistry,
}
