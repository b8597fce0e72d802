//! Console rendering of diagnostics and codeplug summaries.
//!
//! All styling lives here and in the binary; the library itself never
//! prints.

use console::style;

use crate::diag::{Diagnostics, Severity};
use crate::model::Codeplug;

/// Print collected diagnostics, one severity-tagged line each.
pub fn print_diagnostics(diags: &Diagnostics) {
    for record in diags.iter() {
        match record.severity {
            Severity::Info => {
                println!("  {} {}", style("·").cyan(), style(&record.message).dim())
            }
            Severity::Warning => println!(
                "  {} {}",
                style("warning:").yellow().bold(),
                record.message
            ),
            Severity::Error => {
                println!("  {} {}", style("error:").red().bold(), record.message)
            }
        }
    }
}

/// Print record counts for a codeplug.
pub fn print_summary(codeplug: &Codeplug) {
    println!(
        "  {} channels, {} zones, {} talkgroups, {} talkgroup lists",
        style(codeplug.channels.len()).cyan().bold(),
        style(codeplug.zones.len()).cyan().bold(),
        style(codeplug.talkgroups.len()).cyan().bold(),
        style(codeplug.talkgroup_lists.len()).cyan().bold(),
    );
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), style(message).green());
}
