pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod prompt;
pub mod server;

use cli::Args;
use config::RelayConfig;
use log::{info, warn};
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = RelayConfig::from_args(&args);

    info!("--- Core Configuration ---");
    info!("Server Address: {}", config.server_addr);
    info!("Gemini Base URL: {}", config.gemini_base_url);
    info!("Chat Model: {}", config.chat_model);
    info!("Max Output Tokens: {}", config.max_output_tokens);
    info!("Temperature: {}", config.temperature);
    info!("Gemini API Key Present: {}", config.gemini_api_key.is_some());
    info!("-------------------------");

    let client = if config.gemini_api_key.is_some() {
        Some(llm::new_client(&config)?)
    } else {
        warn!("GEMINI_API_KEY is not set; chat requests will be rejected");
        None
    };

    let server = Server::new(config.server_addr.clone(), client);
    server.run().await
}
