//! Terminal display logic for the domain-tracker CLI.
//!
//! Colored result lines, sweep headers, registration detail blocks, and the
//! final summary bar. Uses only the `console` crate.

use console::{pad_str, style, Alignment};
use domain_tracker_lib::{DomainReport, DomainVerdict};
use std::path::Path;
use std::time::Duration;

const DOMAIN_WIDTH: usize = 30;

/// Print a styled header at the start of a watchlist sweep.
pub fn print_header(domain_count: usize, watchlist: &Path) {
    println!(
        "{} {} {}",
        style("domain-tracker").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "— Checking {} domain{} from {}",
            domain_count,
            if domain_count == 1 { "" } else { "s" },
            watchlist.display(),
        ))
        .dim(),
    );
    println!();
}

/// Format and print a single verdict line with colors and alignment.
///
/// If `counter` is Some((current, total)), a progress prefix like `[3/8]`
/// is shown.
pub fn print_verdict(verdict: &DomainVerdict, counter: Option<(usize, usize)>) {
    let padded_domain = pad_str(&verdict.domain, DOMAIN_WIDTH, Alignment::Left, Some(".."));

    let prefix = match counter {
        Some((cur, total)) => {
            format!("{} ", style(format!("[{}/{}]", cur, total)).dim())
        }
        None => String::new(),
    };

    if verdict.is_truly_available() {
        println!(
            "  {}{}  {}",
            prefix,
            style(&padded_domain).white(),
            style("AVAILABLE").green().bold(),
        );
    } else if !verdict.problematic_statuses.is_empty() {
        println!(
            "  {}{}  {}  {}",
            prefix,
            style(&padded_domain).white(),
            style("NOT READY").yellow().bold(),
            style(format!("({})", verdict.problematic_statuses.join(", "))).dim(),
        );
    } else {
        println!(
            "  {}{}  {}",
            prefix,
            style(&padded_domain).white(),
            style("TAKEN").red().bold(),
        );
    }
}

/// Print the registration detail block under a `--details` result.
pub fn print_report_details(report: &DomainReport) {
    if report.has_error {
        let reason = report
            .error_message
            .as_deref()
            .unwrap_or("lookup failed");
        println!("    {} {}", style("└─").dim(), style(reason).dim());
        return;
    }

    let details = format_report_details(report);
    if !details.is_empty() {
        println!("    {} {}", style("└─").dim(), style(details).dim());
    }
}

/// Print the final summary bar with colored counts.
pub fn print_summary(verdicts: &[DomainVerdict], duration: Duration) {
    let available = verdicts.iter().filter(|v| v.is_truly_available()).count();
    let not_ready = verdicts
        .iter()
        .filter(|v| !v.is_truly_available() && !v.problematic_statuses.is_empty())
        .count();
    let taken = verdicts.len() - available - not_ready;

    println!();
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} domain{} in {:.1}s  {}  {}  {}  {}  {}  {}",
        style(verdicts.len()).bold(),
        if verdicts.len() == 1 { "" } else { "s" },
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} available", available)).green(),
        style("|").dim(),
        style(format!("{} not ready", not_ready)).yellow(),
        style("|").dim(),
        style(format!("{} taken", taken)).red(),
    );
}

/// Format registration details (registrar, dates, nameservers) into a
/// concise one-line string.
pub fn format_report_details(report: &DomainReport) -> String {
    let mut parts = Vec::new();
    if let Some(registrar) = &report.registrar_name {
        parts.push(format!("Registrar: {}", registrar));
    }
    if let Some(created) = &report.creation_date {
        parts.push(format!("Created: {}", created));
    }
    if let Some(expires) = &report.expiration_date {
        parts.push(format!("Expires: {}", expires));
    }
    if !report.name_servers.is_empty() {
        parts.push(format!("NS: {}", report.name_servers.join(", ")));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_report_details_all_fields() {
        let report = DomainReport {
            verdict: DomainVerdict::unavailable("example.com"),
            registrar_name: Some("Example Registrar".to_string()),
            creation_date: Some("2020-01-01".to_string()),
            expiration_date: Some("2025-01-01".to_string()),
            name_servers: vec!["ns1.example.com".to_string()],
            ..Default::default()
        };

        let formatted = format_report_details(&report);
        assert!(formatted.contains("Registrar: Example Registrar"));
        assert!(formatted.contains("Created: 2020-01-01"));
        assert!(formatted.contains("Expires: 2025-01-01"));
        assert!(formatted.contains("NS: ns1.example.com"));
    }

    #[test]
    fn test_format_report_details_empty() {
        let report = DomainReport::from_verdict(DomainVerdict::unavailable("example.com"));
        assert_eq!(format_report_details(&report), "");
    }
}
