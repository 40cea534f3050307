//! Shared output formatting for scan reports.

use anyhow::Result;
use meshlint_core::{ScanReport, Severity};

use crate::OutputFormat;

/// Print a scan report in the specified format.
pub fn print(report: &ScanReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "\x1b[35mcritical\x1b[0m",
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn print_text(report: &ScanReport) {
    for result in &report.results {
        println!("{} at {}", result.rule_id, result.asset.path.display());
        println!(
            "  {}: {}",
            severity_indicator(result.severity),
            result.description
        );
        if let Some(label) = result.fix_label() {
            println!("  = fix available: {label}");
        }
        println!();
    }

    let (critical, errors, warnings, infos) = report.count_by_severity();
    let summary_color = if critical > 0 || errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}{}; {} critical, {} error(s), {} warning(s), {} info(s)\x1b[0m",
        summary_color, report.message, critical, errors, warnings, infos
    );
}

fn print_json(report: &ScanReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &ScanReport) {
    for result in &report.results {
        println!(
            "{}: {} [{}] {}",
            result.asset.path.display(),
            result.severity,
            result.rule_id,
            result.description,
        );
    }
}
