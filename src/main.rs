use chat_relay::cli::{chat, Args, Command};
use chat_relay::config::RelayConfig;
use clap::Parser;
use dotenv::dotenv;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command.clone() {
        Some(Command::Chat { message }) => {
            let config = RelayConfig::from_args(&args);
            chat::run(&config, message).await
        }
        Some(Command::Serve) | None => chat_relay::run(args).await,
    }
}
