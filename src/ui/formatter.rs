//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Functions here have no side effects beyond printing.

use console::style;

use crate::domain::Version;
use crate::sequence::ExecutionHistory;
use crate::warning::ReleaseWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning message.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Display a typed release warning to the user.
pub fn display_release_warning(warning: &ReleaseWarning) {
    display_warning(&warning.to_string());
}

/// Display the version the work area holds and the version each release mode would produce.
///
/// # Arguments
/// * `current` - Version currently in the project descriptor
/// * `candidates` - Release mode label paired with its next version, or the reason there is none
pub fn display_version_info(current: &Version, candidates: &[(String, Result<Version, String>)]) {
    println!("\n{}", style("Current version:").bold());
    println!("  {}", style(current).cyan());
    println!("\n{}", style("Next version by release mode:").bold());
    for (label, candidate) in candidates {
        match candidate {
            Ok(next) => println!("  {:<9} {}", label, style(next).green()),
            Err(reason) => println!("  {:<9} {}", label, style(reason).red()),
        }
    }
}

/// Display the proposed version change for a release.
pub fn display_proposed_release(current: &Version, next: &Version, mode: &str) {
    println!("\n{}", style(format!("Proposed {} release:", mode)).bold());
    println!("  From: {}", style(current).red());
    println!("  To:   {}", style(next).green());
}

/// Render the execution history as one line per attempt.
pub fn format_history(history: &ExecutionHistory) -> Vec<String> {
    history
        .iter()
        .enumerate()
        .map(|(i, op)| {
            let outcome = if op.success { "ok" } else { "failed" };
            let changed = if op.state_changed { ", changed state" } else { "" };
            format!("{}. {} {}: {}{}", i + 1, op.method, op.target, outcome, changed)
        })
        .collect()
}

/// Display the execution history.
pub fn display_history(history: &ExecutionHistory) {
    if history.is_empty() {
        return;
    }
    println!("\n{}", style("Pipeline history:").bold());
    for line in format_history(history) {
        println!("  {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{Method, SequenceOperation};

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_status() {
        // Visual verification test - output is printed to stdout
        display_status("test status");
    }

    #[test]
    fn test_format_history() {
        let mut history = ExecutionHistory::new();
        history.record(SequenceOperation::new(Method::Execute, "build", true, true));
        history.record(SequenceOperation::new(Method::Undo, "build", false, false));

        let lines = format_history(&history);
        assert_eq!(lines[0], "1. execute build: ok, changed state");
        assert_eq!(lines[1], "2. undo build: failed");
    }
}
