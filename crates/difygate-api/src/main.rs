//! difygate CLI, gateway server, and interactive client entry point.
//!
//! Binary name: `difygate`
//!
//! Parses CLI arguments, applies `.env`, initializes tracing, then either
//! starts the gateway HTTP server or runs one of the client commands against
//! a running gateway (or, for `analyze`, locally).

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use difygate_infra::config::{GatewaySettings, load_dotenv};
use difygate_observe::tracing_setup::{LogFormat, TracingConfig, init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = cli::log_directive(
        cli.verbose,
        cli.quiet,
        matches!(cli.command, Commands::Serve { .. }),
    );
    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_tracing(&TracingConfig::new(filter).with_format(format).with_otel(cli.otel))
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "difygate", &mut std::io::stdout());
        return Ok(());
    }

    load_dotenv();

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { host, port } => {
            let state = AppState::from_settings(GatewaySettings::from_env())?;

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} difygate gateway listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Client { tree } => {
            let tree = cli::analyze::load_tree(tree.as_deref()).await?;
            cli::client::loop_runner::run_client_loop(&cli.backend_url, tree).await?;
        }

        Commands::Chat {
            message,
            conversation_id,
        } => {
            cli::chat::send_message(&cli.backend_url, &message, conversation_id, cli.json).await?;
        }

        Commands::Upload {
            repo_url,
            bucket,
            key_prefix,
        } => {
            cli::upload::upload_repository(&cli.backend_url, repo_url, bucket, key_prefix, cli.json)
                .await?;
        }

        Commands::Info => {
            cli::info::show_info(&cli.backend_url, cli.json).await?;
        }

        Commands::Analyze { tree } => {
            cli::analyze::run_analysis(tree.as_deref(), cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
