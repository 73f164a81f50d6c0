//! Shared CLI helpers — response printing, version banner.

use colored::Colorize;

/// Print a final answer to stdout.
pub fn print_response(response: &str) {
    println!();
    println!("{}", "🔁 Loopkit".cyan().bold());
    if response.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{response}");
    }
    println!();
}

/// Print a non-error notice about how the run ended.
pub fn print_notice(notice: &str) {
    println!("{}", format!("⚠ {notice}").yellow());
    println!();
}

/// Print the banner shown at REPL start.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "🔁 Loopkit".cyan().bold(), version.dimmed());
    println!("{}", "Type a message, or \"exit\" to quit.".dimmed());
    println!();
}

/// Print a "thinking" spinner placeholder (for non-log mode).
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}
