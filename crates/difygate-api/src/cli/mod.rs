//! CLI command definitions for the `difygate` binary.
//!
//! Uses clap derive macros for argument parsing. `serve` runs the gateway;
//! `client` opens the interactive client; `chat`, `upload`, and `info` are
//! one-shot client commands suited to scripting. `analyze` runs the
//! five-forces questionnaire locally.

pub mod analyze;
pub mod chat;
pub mod client;
pub mod info;
pub mod upload;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

use difygate_infra::config::DEFAULT_BACKEND_URL;

/// Chat with a Dify app and copy git repositories to S3.
#[derive(Parser)]
#[command(name = "difygate", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs as JSON lines instead of text.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Gateway base URL used by the client commands.
    #[arg(long, env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL, global = true)]
    pub backend_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway HTTP server.
    Serve {
        /// Host to bind to.
        #[arg(long, env = "DIFYGATE_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on.
        #[arg(short, long, env = "DIFYGATE_PORT", default_value = "5000")]
        port: u16,
    },

    /// Open the interactive client (chat, upload, info, analyze views).
    Client {
        /// Five-forces question tree (JSON) for the analyze view.
        #[arg(long, env = "DIFYGATE_FIVE_FORCES_TREE")]
        tree: Option<PathBuf>,
    },

    /// Send a single chat message and print the reply.
    Chat {
        /// Message to send.
        message: String,

        /// Continue an existing conversation.
        #[arg(long)]
        conversation_id: Option<String>,
    },

    /// Clone a git repository and copy its files to S3.
    Upload {
        /// Repository URL to clone (prompted if omitted).
        #[arg(long)]
        repo_url: Option<String>,

        /// Destination bucket (prompted if omitted).
        #[arg(long)]
        bucket: Option<String>,

        /// Key prefix for the uploaded files.
        #[arg(long, default_value = "git-repo")]
        key_prefix: String,
    },

    /// Show gateway reachability and local configuration.
    Info,

    /// Answer the five-forces questionnaire and print the analysis.
    Analyze {
        /// Question tree (JSON) to use instead of the built-in one.
        #[arg(long, env = "DIFYGATE_FIVE_FORCES_TREE")]
        tree: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Filter directive used when `RUST_LOG` is unset.
///
/// `-v` raises every workspace crate to debug, not just the binary.
pub(crate) fn log_directive(verbose: u8, quiet: bool, serving: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 if serving => "info",
        0 => "warn",
        1 => {
            "info,difygate=debug,difygate_core=debug,difygate_infra=debug,\
             difygate_observe=debug,tower_http=debug"
        }
        _ => "trace",
    }
}

/// Spinner shown while a gateway call is in flight.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_upload_key_prefix_defaults() {
        let cli = Cli::try_parse_from([
            "difygate",
            "upload",
            "--repo-url",
            "https://github.com/octocat/Hello-World.git",
            "--bucket",
            "my-bucket",
        ])
        .unwrap();

        match cli.command {
            Commands::Upload {
                repo_url,
                bucket,
                key_prefix,
            } => {
                assert_eq!(
                    repo_url.as_deref(),
                    Some("https://github.com/octocat/Hello-World.git")
                );
                assert_eq!(bucket.as_deref(), Some("my-bucket"));
                assert_eq!(key_prefix, "git-repo");
            }
            _ => panic!("expected upload command"),
        }
    }

    #[test]
    fn test_analyze_takes_optional_tree() {
        let cli = Cli::try_parse_from(["difygate", "analyze", "--tree", "forces.json", "--json"])
            .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Analyze { tree } => assert_eq!(tree, Some(PathBuf::from("forces.json"))),
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_log_directive_levels() {
        assert_eq!(log_directive(0, true, true), "error");
        assert_eq!(log_directive(0, false, true), "info");
        assert_eq!(log_directive(0, false, false), "warn");
        assert_eq!(log_directive(2, true, false), "trace");
    }

    #[test]
    fn test_verbose_directive_covers_workspace_crates() {
        let directive = log_directive(1, false, false);
        for target in [
            "difygate=debug",
            "difygate_core=debug",
            "difygate_infra=debug",
            "difygate_observe=debug",
            "tower_http=debug",
        ] {
            assert!(
                directive.split(',').any(|part| part == target),
                "missing {target} in {directive}"
            );
        }
        assert!(tracing_subscriber::EnvFilter::try_new(directive).is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "difygate",
            "chat",
            "hello",
            "--json",
            "--backend-url",
            "http://gateway:5000",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.backend_url, "http://gateway:5000");
        assert!(matches!(cli.command, Commands::Chat { .. }));
    }
}
