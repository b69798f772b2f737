use thiserror::Error;

/// Failures raised inside the relay endpoint. Every variant renders as an
/// HTTP 500 `ChatErrorResponse`; the distinction exists for callers and
/// tests, not for the wire status.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("GEMINI_API_KEY is not set")]
    MissingCredential,

    #[error("Message is required")]
    MissingMessage,

    #[error("Invalid chat request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    /// Non-success status from the generation API, carrying the raw body.
    #[error("Gemini API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("No response from Gemini API")]
    UpstreamEmptyResponse,

    #[error("Gemini request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failures raised by the relay client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Relay URL or API key is not set")]
    Configuration,

    /// Non-success status from the relay, with the best-effort decoded
    /// `error` field of the body.
    #[error("HTTP {status}: {message}")]
    Transport { status: u16, message: String },

    /// The relay answered with a success status but `success: false`.
    #[error("{0}")]
    Application(String),

    #[error("Relay request failed: {0}")]
    Http(#[from] reqwest::Error),
}
