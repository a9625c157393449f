//! Five-forces analysis: the `/analyze` client view and `difygate analyze`.
//!
//! Runs locally against the compiled-in question tree, or a JSON tree given
//! with `--tree`. Nothing is sent to the gateway.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Select;

use difygate_core::client::analysis::{FiveForcesAnalysis, PendingQuestion, builtin_tree};
use difygate_types::analysis::{AnalysisReport, ForceTree};

/// The tree at `path`, or the built-in one.
pub async fn load_tree(path: Option<&Path>) -> Result<ForceTree> {
    let Some(path) = path else {
        return builtin_tree().context("Built-in question tree is invalid");
    };
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read question tree: {}", path.display()))?;
    ForceTree::from_json(&json)
        .with_context(|| format!("Failed to load question tree: {}", path.display()))
}

/// `difygate analyze` - answer every question with arrow-key menus, then
/// print the report.
///
/// # Examples
///
/// ```bash
/// difygate analyze
/// difygate analyze --tree ./my_tree.json --json
/// ```
pub async fn run_analysis(tree_path: Option<&Path>, json: bool) -> Result<()> {
    let mut analysis = FiveForcesAnalysis::new(load_tree(tree_path).await?);

    while let Some(pending) = analysis.current() {
        let prompt = format!(
            "[{}/{}] {}: {}",
            pending.position, pending.total, pending.category.category, pending.node.question
        );
        let labels: Vec<&str> = pending
            .node
            .choices
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        let selection = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()?;
        analysis.select(selection)?;
    }

    let report = analysis
        .report()
        .context("Analysis ended before every category was answered")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Show the waiting question with numbered choices.
pub fn print_question(pending: &PendingQuestion<'_>) {
    println!();
    println!(
        "  {} {}",
        style(format!("[{}/{}]", pending.position, pending.total)).dim(),
        style(&pending.category.category).cyan().bold()
    );
    println!("  {}", pending.node.question);
    for (i, choice) in pending.node.choices.iter().enumerate() {
        println!("    {} {}", style(format!("{}.", i + 1)).yellow(), choice.label);
    }
    println!();
}

pub fn print_report(report: &AnalysisReport) {
    println!();
    println!("  {}", style("── Five forces ──").dim());

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Force").fg(Color::White),
        Cell::new("Assessment").fg(Color::White),
    ]);
    for category in &report.categories {
        table.add_row(vec![
            Cell::new(&category.category).fg(Color::Cyan),
            Cell::new(format!("{}\n{}", category.summary, category.details)),
        ]);
    }
    println!("{table}");
    println!();

    println!("  {}", style("── Overall ──").dim());
    for strength in &report.strengths {
        println!("  {} {}", style("+").green().bold(), strength);
    }
    for challenge in &report.challenges {
        println!("  {} {}", style("-").red().bold(), challenge);
    }
    println!();
    println!("  {}", report.overall_summary);
    println!();
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use difygate_types::analysis::Force;

    use super::*;

    #[tokio::test]
    async fn test_load_tree_defaults_to_builtin() {
        let tree = load_tree(None).await.unwrap();
        assert_eq!(tree.five_forces.len(), 5);
    }

    #[tokio::test]
    async fn test_load_tree_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"five_forces": [{{"category": "Subs", "force": "substitutes",
                "nodes": [{{"id": "q1", "question": "Replaceable?", "choices": [{{"label": "No"}}]}}]}}]}}"#
        )
        .unwrap();

        let tree = load_tree(Some(file.path())).await.unwrap();
        assert_eq!(tree.five_forces[0].force, Force::Substitutes);
    }

    #[tokio::test]
    async fn test_load_tree_reports_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"five_forces": []}}"#).unwrap();

        let err = load_tree(Some(file.path())).await.unwrap_err();
        assert!(format!("{err:#}").contains("no categories"));

        let missing = load_tree(Some(Path::new("/nonexistent/tree.json")))
            .await
            .unwrap_err();
        assert!(missing.to_string().contains("Failed to read question tree"));
    }
}
