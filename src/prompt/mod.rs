use crate::models::chat::ChatMessage;

/// Number of trailing history entries kept as context. Applied by the
/// client before sending and again by the relay before prompt assembly.
pub const HISTORY_WINDOW: usize = 10;

/// Keep the last [`HISTORY_WINDOW`] entries, order preserved.
pub fn truncate_history(history: &[ChatMessage]) -> &[ChatMessage] {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    &history[start..]
}

/// Render the upstream prompt. With no history the message passes through
/// verbatim; otherwise prior turns are listed as `role: content` lines
/// under a `Previous conversation:` header before the current message.
pub fn build_prompt(message: &str, history: &[ChatMessage]) -> String {
    if history.is_empty() {
        return message.to_string();
    }

    let context = truncate_history(history)
        .iter()
        .map(|msg| format!("{}: {}", msg.role, msg.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!("Previous conversation:\n{}\n\nUser: {}", context, message)
}
