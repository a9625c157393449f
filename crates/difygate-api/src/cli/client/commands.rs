//! Slash command parsing for the client loop.
//!
//! Commands start with `/` and switch views or manage the conversation.

use console::style;

/// Available slash commands in the client loop.
#[derive(Debug, PartialEq)]
pub enum ClientCommand {
    /// Show available commands.
    Help,
    /// Switch to the chat view.
    Chat,
    /// Switch to the upload form.
    Upload,
    /// Switch to the info view.
    Info,
    /// Start the five-forces questionnaire.
    Analyze,
    /// Forget the transcript and start a new conversation.
    Reset,
    /// Forget the transcript but keep the conversation going.
    Clear,
    /// Show the transcript.
    History,
    /// Leave the client.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ClientCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ClientCommand::Help),
        "/chat" => Some(ClientCommand::Chat),
        "/upload" | "/up" => Some(ClientCommand::Upload),
        "/info" => Some(ClientCommand::Info),
        "/analyze" | "/forces" => Some(ClientCommand::Analyze),
        "/reset" | "/new" => Some(ClientCommand::Reset),
        "/clear" => Some(ClientCommand::Clear),
        "/history" => Some(ClientCommand::History),
        "/exit" | "/quit" | "/q" => Some(ClientCommand::Exit),
        other => Some(ClientCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/chat", "Chat with the Dify app"),
        ("/upload", "Copy a git repository to S3"),
        ("/info", "Show backend status and configuration"),
        ("/analyze", "Run a five-forces analysis of your business"),
        ("/reset", "Clear history and start a new conversation"),
        ("/clear", "Clear history, keep the conversation"),
        ("/history", "Show conversation history"),
        ("/help", "Show this help message"),
        ("/exit", "Leave the client"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (cmd, text) in rows {
        println!("  {:<10} {}", style(cmd).cyan(), text);
    }
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}
