//! Repository upload command and outcome display.

use anyhow::Result;
use console::style;
use dialoguer::Input;

use difygate_core::client::session::{ClientSession, UploadOutcome};
use difygate_infra::gateway::HttpGatewayClient;
use difygate_types::upload::UploadRequest;

use super::spinner;

/// `difygate upload` - clone a repository and copy it to S3 via the gateway.
///
/// # Examples
///
/// ```bash
/// # Interactive prompts for the missing fields
/// difygate upload
///
/// # One-shot with flags
/// difygate upload --repo-url https://github.com/octocat/Hello-World.git --bucket my-bucket
/// ```
pub async fn upload_repository(
    backend_url: &str,
    repo_url: Option<String>,
    bucket: Option<String>,
    key_prefix: String,
    json: bool,
) -> Result<()> {
    let repo_url = match repo_url {
        Some(url) => url,
        None => Input::<String>::new()
            .with_prompt("Git repository URL")
            .interact_text()?,
    };

    let bucket = match bucket {
        Some(b) => b,
        None => Input::<String>::new()
            .with_prompt("S3 bucket name")
            .interact_text()?,
    };

    let session = ClientSession::new(HttpGatewayClient::new(backend_url)?);
    let request = UploadRequest::new(repo_url, bucket, Some(key_prefix));

    let progress = (!json).then(|| spinner("Cloning repository and uploading to S3..."));
    let outcome = session.upload(request).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    match outcome {
        UploadOutcome::Uploaded(body) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_upload_outcome(&UploadOutcome::Uploaded(body));
            }
            Ok(())
        }
        UploadOutcome::Rejected(message) | UploadOutcome::Failed(message) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({ "error": message }))?
                );
            }
            anyhow::bail!(message)
        }
    }
}

/// Show an upload result the way the upload view does.
pub fn print_upload_outcome(outcome: &UploadOutcome) {
    match outcome {
        UploadOutcome::Uploaded(body) => {
            println!();
            println!("  {} Upload complete", style("✓").green().bold());
            let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
            for line in pretty.lines() {
                println!("    {}", style(line).dim());
            }
            println!();
        }
        UploadOutcome::Rejected(message) => {
            println!();
            println!("  {} {}", style("!").yellow().bold(), message);
            println!();
        }
        UploadOutcome::Failed(message) => {
            println!();
            println!("  {} {}", style("✗").red().bold(), style(message).red());
            println!();
        }
    }
}
