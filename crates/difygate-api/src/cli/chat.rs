//! One-shot chat command.

use anyhow::Result;
use console::style;
use crossterm::style::Color;

use difygate_core::client::gateway::GatewayApi;
use difygate_core::client::session::{NO_RESPONSE_PLACEHOLDER, chat_error_text};
use difygate_infra::gateway::HttpGatewayClient;
use difygate_types::chat::ChatRequest;

use super::client::renderer::ReplyRenderer;
use super::spinner;

/// `difygate chat <message>` - send one message and print the reply.
///
/// With `--json` the gateway's response body is printed unchanged.
pub async fn send_message(
    backend_url: &str,
    message: &str,
    conversation_id: Option<String>,
    json: bool,
) -> Result<()> {
    let gateway = HttpGatewayClient::new(backend_url)?;
    let request = ChatRequest::new(message, conversation_id);

    let progress = (!json).then(|| spinner("thinking..."));
    let result = gateway.chat(&request).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    let body = result.map_err(|e| anyhow::anyhow!(chat_error_text(&e)))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let answer = body
        .get("answer")
        .and_then(|v| v.as_str())
        .unwrap_or(NO_RESPONSE_PLACEHOLDER);

    let renderer = ReplyRenderer::new(Color::Cyan);
    println!();
    println!("  {}", renderer.render(answer).trim());
    println!();
    if let Some(id) = body.get("conversation_id").and_then(|v| v.as_str()) {
        println!(
            "  {} {}",
            style("conversation:").dim(),
            style(id).dim()
        );
        println!(
            "  {}",
            style(format!("continue with: difygate chat --conversation-id {id} <message>")).dim()
        );
        println!();
    }

    Ok(())
}
