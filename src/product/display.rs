use crate::catalog::{FileOutcome, Outcome};
use crate::product::validation::ValidationReport;
use colored::*;

fn header(head: &str, width: usize) -> String {
    let mut header = format!("  {}  ", head);
    while header.len() < width {
        header.push(' ');
    }
    header
}

pub fn success_header(head: &str) -> String {
    header(head, 12).on_green().black().to_string()
}

pub fn error_header(head: &str) -> String {
    header(head, 12).on_red().black().to_string()
}

pub fn skip_header(head: &str) -> String {
    header(head, 12).on_yellow().black().to_string()
}

/// One line per report: `Success`, or the failure reasons in check order.
pub fn report_line(report: &ValidationReport, details: bool) -> String {
    match report.is_success() {
        true => success_header("Success"),
        false => format!("{} {}", error_header("Failed"), reasons(report, details)),
    }
}

fn reasons(report: &ValidationReport, details: bool) -> String {
    report
        .failures()
        .iter()
        .map(|failure| match details {
            true => failure.to_string(),
            false => failure.reason().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn outcome_line(file_outcome: &FileOutcome, details: bool) -> String {
    let FileOutcome { file_name, outcome } = file_outcome;

    match outcome {
        Outcome::Accepted => format!("{} {}", success_header("Success"), file_name),
        Outcome::Rejected(report) => format!(
            "{} {} - {}",
            error_header("Failed"),
            file_name,
            reasons(report, details)
        ),
        Outcome::Duplicate { model } => format!(
            "{} {} - Model {} already exists in catalog",
            skip_header("Skipped"),
            file_name,
            model
        ),
        Outcome::Unreadable(error) => format!("{} {} - {}", error_header("Error"), file_name, error),
    }
}

pub fn print_outcome(file_outcome: &FileOutcome, details: bool) -> () {
    println!("{}", outcome_line(file_outcome, details));
}
