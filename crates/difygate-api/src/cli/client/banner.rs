//! Welcome banner and view headers for the interactive client.

use console::style;

/// Print the welcome banner when the client starts.
pub fn print_welcome_banner(backend_url: &str, reachable: bool) {
    let status = if reachable {
        style("reachable").green()
    } else {
        style("unreachable").red()
    };

    println!();
    println!("  {} {}", "🤖", style("difygate client").cyan().bold());
    println!("  {}", style("Chat with a Dify app, copy git repositories to S3").dim());
    println!();
    println!("  {}  {} ({})", style("Backend:").bold(), style(backend_url).dim(), status);
    println!();
    println!(
        "  {}",
        style("Type /help for commands, /upload, /info or /analyze to switch views, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// Print the heading shown when switching views.
pub fn print_view_header(title: &str, hint: &str) {
    println!();
    println!("  {}", style(title).bold());
    println!("  {}", style(hint).dim());
    println!();
}
