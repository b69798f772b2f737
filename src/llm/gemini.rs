use async_trait::async_trait;
use log::{error, info};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use super::{ChatClient, CompletionResponse};
use crate::config::RelayConfig;
use crate::error::RelayError;

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

/// Non-streaming `generateContent` client for the Gemini API.
pub struct GeminiClient {
    http: HttpClient,
    api_key: String,
    base_url: String,
    model: String,
    max_output_tokens: u32,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            http: HttpClient::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            max_output_tokens,
            temperature,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or(RelayError::MissingCredential)?;

        Ok(Self::new(
            api_key,
            config.gemini_base_url.clone(),
            config.chat_model.clone(),
            config.max_output_tokens,
            config.temperature,
        ))
    }

    /// POST the prompt as the sole text part and return the first
    /// candidate's text.
    pub async fn generate(&self, prompt: &str) -> Result<String, RelayError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let payload = GenerateRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
                temperature: self.temperature,
            },
        };

        info!("GeminiClient::generate() → model={}", self.model);

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!("Gemini API error: {}", body);
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let data = resp.json::<GenerateResponse>().await?;
        data.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(RelayError::UpstreamEmptyResponse)
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, RelayError> {
        let text = self.generate(prompt).await?;
        Ok(CompletionResponse { response: text })
    }
}
