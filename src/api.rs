//! HTTP API for the chat proxy
//!
//! `POST /api/chat` forwards one user message to the configured upstream
//! model and relays the reply.

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::llm::LlmService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Upstream completion service, chosen once at startup. `None` when no
    /// provider credential is configured.
    pub llm: Option<Arc<dyn LlmService>>,
    pub max_tokens: Option<u32>,
}

impl AppState {
    pub fn new(llm: Option<Arc<dyn LlmService>>, max_tokens: Option<u32>) -> Self {
        Self { llm, max_tokens }
    }
}
