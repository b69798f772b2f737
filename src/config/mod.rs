use crate::cli::Args;

pub const DEFAULT_GEMINI_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";

/// Immutable runtime configuration, built once from [`Args`] and handed to
/// both the relay server and the relay client at construction. Business
/// logic never reads the environment directly.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub server_addr: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub chat_model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub relay_url: Option<String>,
    pub relay_api_key: Option<String>,
}

impl RelayConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            server_addr: args.server_addr.clone(),
            gemini_api_key: args
                .gemini_api_key
                .clone()
                .filter(|key| !key.is_empty()),
            gemini_base_url: args.gemini_base_url.clone(),
            chat_model: args.chat_model.clone(),
            max_output_tokens: args.max_output_tokens,
            temperature: args.temperature,
            relay_url: args.relay_url.clone().filter(|url| !url.is_empty()),
            relay_api_key: args
                .relay_api_key
                .clone()
                .filter(|key| !key.is_empty()),
        }
    }
}
