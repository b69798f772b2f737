pub mod gemini;

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::error::RelayError;
use self::gemini::GeminiClient;

#[derive(Deserialize, Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

/// Seam between the relay handler and the upstream generation API.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, RelayError>;
}

/// Build the upstream client for the configured backend. Fails with
/// [`RelayError::MissingCredential`] when no API key is configured.
pub fn new_client(config: &RelayConfig) -> Result<Arc<dyn ChatClient>, RelayError> {
    let client = GeminiClient::from_config(config)?;
    Ok(Arc::new(client))
}
