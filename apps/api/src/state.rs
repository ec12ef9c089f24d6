use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::records::RecordWriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `LlmClient` in production. Tests swap in a scripted generator.
    pub generator: Arc<dyn TextGenerator>,
    /// Queue in front of the CSV record store.
    pub records: RecordWriter,
}
