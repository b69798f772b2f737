use std::error::Error;
use std::io::{self, BufRead, Write};

use crate::client::RelayClient;
use crate::config::RelayConfig;
use crate::models::chat::{ChatMessage, Role};

/// One-shot send when a message is given, otherwise a stdin REPL that
/// keeps the conversation history on the client side and replays it with
/// every turn. `exit`, `quit`, or EOF ends the session.
pub async fn run(
    config: &RelayConfig,
    message: Option<String>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let client = RelayClient::from_config(config)?;

    if let Some(message) = message {
        let reply = client.send_message(&message, &[]).await?;
        println!("{}", reply);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut history: Vec<ChatMessage> = Vec::new();

    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "exit" || message == "quit" {
            break;
        }

        let reply = client.send_message(message, &history).await?;
        println!("assistant> {}", reply);

        history.push(ChatMessage::new(Role::User, message));
        history.push(ChatMessage::new(Role::Assistant, reply));
    }

    Ok(())
}
