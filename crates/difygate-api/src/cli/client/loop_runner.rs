//! Main client loop orchestration.
//!
//! Reads lines, routes slash commands, and hands everything else to the
//! active view: chat messages go to the gateway, upload lines fill the form,
//! and the info view refreshes on Enter.

use console::style;
use crossterm::style::Color;
use tracing::info;

use difygate_core::client::analysis::FiveForcesAnalysis;
use difygate_core::client::gateway::GatewayApi;
use difygate_core::client::session::ClientSession;
use difygate_infra::config::config_status;
use difygate_infra::gateway::HttpGatewayClient;
use difygate_types::analysis::ForceTree;

use crate::cli::analyze::{print_question, print_report};
use crate::cli::info::print_info_report;
use crate::cli::spinner;
use crate::cli::upload::print_upload_outcome;

use super::banner::{print_view_header, print_welcome_banner};
use super::commands::{self, ClientCommand};
use super::form::UploadForm;
use super::input::{ClientInput, InputEvent};
use super::renderer::ReplyRenderer;

/// Which view the next plain line is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Chat,
    Upload,
    Info,
    Analyze,
}

/// Run the interactive client against the gateway at `backend_url`.
///
/// `tree` drives the analyze view.
pub async fn run_client_loop(backend_url: &str, tree: ForceTree) -> anyhow::Result<()> {
    let mut session = ClientSession::new(HttpGatewayClient::new(backend_url)?);
    let renderer = ReplyRenderer::new(Color::Cyan);
    let mut form = UploadForm::new();
    let mut analysis = FiveForcesAnalysis::new(tree);
    let mut view = View::Chat;

    let reachable = session.backend_reachable().await;
    print_welcome_banner(backend_url, reachable);
    if !reachable {
        println!(
            "  {} Backend did not answer its health check; requests may fail.\n",
            style("!").yellow().bold()
        );
    }

    let (mut input, _writer) = ClientInput::new(prompt_for(view, &form, &analysis))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit.").dim());
                continue;
            }
            InputEvent::Line(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ClientCommand::Help => commands::print_help(),
                ClientCommand::Exit => break,
                ClientCommand::Chat => {
                    view = View::Chat;
                    print_view_header("Chat", "Type a message and press Enter.");
                }
                ClientCommand::Upload => {
                    view = View::Upload;
                    form = UploadForm::new();
                    print_view_header(
                        "Git repository → S3",
                        "Answer each prompt; leave the key prefix empty for the default.",
                    );
                }
                ClientCommand::Info => {
                    view = View::Info;
                    print_view_header("Info", "Press Enter to refresh.");
                    show_info(&session, backend_url).await;
                }
                ClientCommand::Analyze => {
                    view = View::Analyze;
                    analysis.restart();
                    print_view_header(
                        "Five forces analysis",
                        "Answer with a choice number or its text.",
                    );
                    show_question(&analysis);
                }
                ClientCommand::Reset => {
                    session.reset();
                    println!("\n  {} Started a new conversation.\n", style("*").cyan().bold());
                }
                ClientCommand::Clear => {
                    session.clear_history();
                    println!("\n  {} History cleared.\n", style("*").cyan().bold());
                }
                ClientCommand::History => print_history(&session, &renderer),
                ClientCommand::Unknown(name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                }
            }
            input.update_prompt(&prompt_for(view, &form, &analysis));
            continue;
        }

        match view {
            View::Chat => {
                if text.is_empty() {
                    continue;
                }
                let progress = spinner("thinking...");
                let reply = session.send_chat(&text).await;
                progress.finish_and_clear();
                renderer.print_turn(reply);
            }
            View::Upload => {
                if let Some(request) = form.accept(&text) {
                    let progress = spinner("Cloning repository and uploading to S3...");
                    let outcome = session.upload(request).await;
                    progress.finish_and_clear();
                    print_upload_outcome(&outcome);
                }
            }
            View::Info => show_info(&session, backend_url).await,
            View::Analyze => answer_question(&mut analysis, &text),
        }

        input.update_prompt(&prompt_for(view, &form, &analysis));
    }

    input.flush();
    println!("\n  {}", style("Session ended.").dim());
    info!(turns = session.state().turns().len(), "Client session ended");
    Ok(())
}

fn prompt_for(view: View, form: &UploadForm, analysis: &FiveForcesAnalysis) -> String {
    match view {
        View::Chat => format!("  {} ", style("You >").green().bold()),
        View::Upload => {
            let field = form.field();
            let label = format!("{} [{}] >", field.label(), field.placeholder());
            format!("  {} ", style(label).yellow().bold())
        }
        View::Info => format!("  {} ", style("Info >").blue().bold()),
        View::Analyze => match analysis.current() {
            Some(pending) => {
                let label = format!("Choice [1-{}] >", pending.node.choices.len());
                format!("  {} ", style(label).magenta().bold())
            }
            None => format!("  {} ", style("Analyze (Enter to restart) >").magenta().bold()),
        },
    }
}

fn show_question(analysis: &FiveForcesAnalysis) {
    if let Some(pending) = analysis.current() {
        print_question(&pending);
    }
}

/// Apply one typed answer; print the next question or the finished report.
fn answer_question(analysis: &mut FiveForcesAnalysis, text: &str) {
    if analysis.is_complete() {
        analysis.restart();
        show_question(analysis);
        return;
    }

    if text.trim().is_empty() {
        show_question(analysis);
        return;
    }

    if let Err(e) = analysis.answer(text) {
        println!("\n  {} {}\n", style("?").yellow().bold(), e);
        show_question(analysis);
        return;
    }

    match analysis.report() {
        Some(report) => {
            print_report(&report);
            println!(
                "  {}\n",
                style("Press Enter to start again, or /chat to go back.").dim()
            );
        }
        None => show_question(analysis),
    }
}

async fn show_info<G: GatewayApi>(session: &ClientSession<G>, backend_url: &str) {
    let progress = spinner("checking backend...");
    let report = session.info(config_status(backend_url)).await;
    progress.finish_and_clear();
    print_info_report(&report);
}

fn print_history<G: GatewayApi>(session: &ClientSession<G>, renderer: &ReplyRenderer) {
    let turns = session.state().turns();
    println!();
    if turns.is_empty() {
        println!("  {}", style("No messages yet.").dim());
        println!();
        return;
    }
    for turn in turns {
        renderer.print_turn(turn);
    }
    if let Some(id) = session.state().conversation_id() {
        println!("  {} {}", style("conversation:").dim(), style(id).dim());
        println!();
    }
}
