//! Info view: backend reachability, local configuration, and what the
//! application does.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use difygate_core::client::session::{ClientSession, InfoReport};
use difygate_infra::config::config_status;
use difygate_infra::gateway::HttpGatewayClient;

/// Components of the application, shown in the info view.
pub const ARCHITECTURE: &[(&str, &str)] = &[
    ("Frontend", "Interactive terminal client"),
    ("Backend", "axum gateway service"),
    ("AI", "Dify API"),
    ("Storage", "Amazon S3"),
];

pub const FEATURES: &[&str] = &[
    "Chat with a Dify app; the conversation carries over between messages",
    "Clone a git repository and copy every file to an S3 bucket",
    "Check backend health and which credentials are configured",
    "Walk through a five-forces analysis of your business",
];

/// `difygate info` - print the info view once.
pub async fn show_info(backend_url: &str, json: bool) -> Result<()> {
    let session = ClientSession::new(HttpGatewayClient::new(backend_url)?);
    let report = session.info(config_status(backend_url)).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&info_json(&report))?);
        return Ok(());
    }

    print_info_report(&report);
    Ok(())
}

pub fn info_json(report: &InfoReport) -> serde_json::Value {
    serde_json::json!({
        "backend_url": report.config.backend_url,
        "backend_reachable": report.backend_reachable,
        "configuration": {
            "DIFY_API_KEY": report.config.dify_api_key,
            "AWS_ACCESS_KEY_ID": report.config.aws_access_key_id,
            "AWS_SECRET_ACCESS_KEY": report.config.aws_secret_access_key,
        },
    })
}

pub fn print_info_report(report: &InfoReport) {
    println!();
    println!("  {}", style("── Backend ──").dim());
    if report.backend_reachable {
        println!("  {} Backend is reachable", style("✓").green());
    } else {
        println!("  {} Backend is unreachable", style("✗").red());
    }
    println!();

    println!("  {}", style("── Configuration ──").dim());
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Variable").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);
    for (name, value) in report.config.rows() {
        let cell = match value.as_str() {
            "configured" => Cell::new(value).fg(Color::Green),
            "not configured" => Cell::new(value).fg(Color::Red),
            _ => Cell::new(value),
        };
        table.add_row(vec![Cell::new(name), cell]);
    }
    println!("{table}");
    println!();

    println!("  {}", style("── About ──").dim());
    for (part, what) in ARCHITECTURE {
        println!("  {:<9} {}", style(part).bold(), what);
    }
    println!();
    for feature in FEATURES {
        println!("  • {feature}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use difygate_types::config::ConfigStatus;

    use super::*;

    #[test]
    fn test_info_json_reports_presence_only() {
        let report = InfoReport {
            backend_reachable: false,
            config: ConfigStatus {
                backend_url: "http://localhost:5000".to_string(),
                dify_api_key: true,
                aws_access_key_id: false,
                aws_secret_access_key: false,
            },
        };

        assert_eq!(
            info_json(&report),
            serde_json::json!({
                "backend_url": "http://localhost:5000",
                "backend_reachable": false,
                "configuration": {
                    "DIFY_API_KEY": true,
                    "AWS_ACCESS_KEY_ID": false,
                    "AWS_SECRET_ACCESS_KEY": false,
                },
            })
        );
    }
}
