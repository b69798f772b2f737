pub mod chat;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_GEMINI_BASE_URL;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Chat relay for the Gemini generation API", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    // --- Server Args ---
    /// Host address and port for the relay server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:4000")]
    pub server_addr: String,

    // --- Upstream Generation API Args ---
    /// API key for the upstream Gemini API. Without it the server starts
    /// but rejects every chat request.
    #[arg(long, env = "GEMINI_API_KEY")]
    pub gemini_api_key: Option<String>,

    /// Base URL for the upstream Gemini API.
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    /// Model name for chat completion.
    #[arg(long, env = "CHAT_MODEL", default_value = "gemini-1.5-flash")]
    pub chat_model: String,

    /// Maximum number of tokens the model may generate per reply.
    #[arg(long, env = "MAX_OUTPUT_TOKENS", default_value = "1000")]
    pub max_output_tokens: u32,

    /// Sampling temperature passed to the model.
    #[arg(long, env = "TEMPERATURE", default_value = "0.7")]
    pub temperature: f32,

    // --- Relay Client Args ---
    /// Base URL of the relay endpoint, used by the chat subcommand.
    #[arg(long, env = "RELAY_URL")]
    pub relay_url: Option<String>,

    /// Bearer credential the chat subcommand sends to the relay.
    #[arg(long, env = "RELAY_API_KEY")]
    pub relay_api_key: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the chat relay HTTP server (default)
    Serve,

    /// Send a single message through the relay, or enter an interactive
    /// chat session when no message is given
    Chat {
        /// The message to send
        message: Option<String>,
    },
}
