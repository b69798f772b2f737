use log::error;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::config::RelayConfig;
use crate::error::ClientError;
use crate::models::chat::ChatMessage;
use crate::prompt;

const UNKNOWN_ERROR: &str = "unknown error occurred";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest<'a> {
    message: &'a str,
    conversation_history: &'a [ChatMessage],
}

/// Decoded leniently so that both envelope shapes and unexpected bodies can
/// be inspected for an error message.
#[derive(Deserialize)]
struct RelayReply {
    #[serde(default)]
    success: bool,
    response: Option<String>,
    error: Option<String>,
}

/// Client for the chat relay endpoint, hiding transport details from UI
/// code.
#[derive(Debug)]
pub struct RelayClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl RelayClient {
    /// Fails before any network activity when the relay URL or credential
    /// is not configured.
    pub fn from_config(config: &RelayConfig) -> Result<Self, ClientError> {
        match (&config.relay_url, &config.relay_api_key) {
            (Some(url), Some(key)) => Ok(Self {
                http: HttpClient::new(),
                base_url: url.trim_end_matches('/').to_string(),
                api_key: key.clone(),
            }),
            _ => Err(ClientError::Configuration),
        }
    }

    /// Send one message with the given prior turns, returning the reply
    /// text. History is truncated to its last 10 entries before sending.
    pub async fn send_message(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, ClientError> {
        match self.dispatch(message, history).await {
            Ok(text) => Ok(text),
            Err(err) => {
                error!("Chat API error: {}", err);
                Err(err)
            }
        }
    }

    async fn dispatch(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, ClientError> {
        let url = format!("{}/chat", self.base_url);
        let body = SendRequest {
            message,
            conversation_history: prompt::truncate_history(history),
        };

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<RelayReply>()
                .await
                .ok()
                .and_then(|reply| reply.error)
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            return Err(ClientError::Transport {
                status: status.as_u16(),
                message,
            });
        }

        let reply = resp.json::<RelayReply>().await?;
        if !reply.success {
            return Err(ClientError::Application(
                reply.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            ));
        }

        reply
            .response
            .ok_or_else(|| ClientError::Application(UNKNOWN_ERROR.to_string()))
    }
}
