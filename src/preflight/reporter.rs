//! Terminal output for preflight reports

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::runner::PreflightReport;

/// Formats a preflight report as a table followed by a summary
pub fn format_report(report: &PreflightReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Check", "Status", "Time", "Message"]);

    for (name, result) in &report.results {
        let duration = format!("{:.2?}", result.duration);
        builder.push_record([
            *name,
            &result.status.as_colored_str(),
            &duration,
            &result.message,
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut output = format!("Preflight for profile '{}'\n", report.profile.bold());
    output.push_str(&table.to_string());
    output.push('\n');
    output.push_str(&format_summary(report));
    output
}

fn format_summary(report: &PreflightReport) -> String {
    let mut summary = format!("\n{}\n", "Summary".bold().underline());
    summary.push_str(&format!("  Total checks: {}\n", report.total()));
    summary.push_str(&format!("  {} Passed: {}\n", "✓".green(), report.passed));

    if report.warned > 0 {
        summary.push_str(&format!("  {} Warned: {}\n", "⚠".yellow(), report.warned));
    }
    if report.failed > 0 {
        summary.push_str(&format!("  {} Failed: {}\n", "✗".red(), report.failed));
    }

    summary.push('\n');
    let verdict = match (report.is_healthy(), report.has_warnings()) {
        (false, _) => "Ready to launch: NO".red().bold(),
        (true, true) => "Ready to launch: YES (with warnings)".yellow().bold(),
        (true, false) => "Ready to launch: YES".green().bold(),
    };
    summary.push_str(&format!("  {}\n", verdict));
    summary
}

/// Prints the report and every check's findings to stdout
pub fn print_report(report: &PreflightReport) {
    println!("{}", format_report(report));

    for (name, result) in &report.results {
        if !result.details.is_empty() {
            println!("\n{} details:", name.bold());
            for line in &result.details {
                println!("{}", line);
            }
        }
    }
}
