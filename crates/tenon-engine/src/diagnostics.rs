//! Deterministic rendering of conformance failures.
//!
//! The same inputs always render the same bytes: contracts sorted by name,
//! members sorted within each section, conflict contributors sorted. This is
//! the text behind [`crate::types::ConformanceError::Unimplemented`]'s
//! `Display` and the human formatter's failure output.

use crate::types::{ConformanceFailure, ContractReport, DefaultConflict};

/// Render one contract's report as a diagnostic block.
pub fn render_contract_report(candidate: &str, report: &ContractReport) -> String {
    let mut sections: Vec<String> = Vec::new();

    if !report.missing.is_empty() {
        let lines: Vec<String> = report
            .missing
            .iter()
            .map(|m| format!("  - {}{}", m.name, m.declared))
            .collect();
        sections.push(format!(
            "The following members of {} were not implemented:\n{}",
            report.contract,
            lines.join("\n")
        ));
    }

    if !report.mistyped.is_empty() {
        let lines: Vec<String> = report
            .mistyped
            .iter()
            .map(|m| {
                format!(
                    "  - {}: {} is not a subkind of expected kind {}",
                    m.name, m.actual, m.expected
                )
            })
            .collect();
        sections.push(format!(
            "The following members of {} were implemented with incorrect kinds:\n{}",
            report.contract,
            lines.join("\n")
        ));
    }

    if !report.mismatched.is_empty() {
        let lines: Vec<String> = report
            .mismatched
            .iter()
            .map(|m| format!("  - {}{} != {}{}", m.name, m.actual, m.name, m.declared))
            .collect();
        sections.push(format!(
            "The following members of {} were implemented with invalid signatures:\n{}",
            report.contract,
            lines.join("\n")
        ));
    }

    format!(
        "class {} failed to implement contract {}:\n\n{}",
        candidate,
        report.contract,
        sections.join("\n\n")
    )
}

fn render_conflicts(conflicts: &[DefaultConflict]) -> String {
    let lines: Vec<String> = conflicts
        .iter()
        .map(|c| format!("  - {}: defaulted by {}", c.member, c.contracts.join(", ")))
        .collect();
    format!(
        "The following default members are supplied by multiple contracts:\n{}",
        lines.join("\n")
    )
}

/// Render a whole failure: every failing contract's block, contract-sorted,
/// then default conflicts, separated by blank lines.
pub fn render_failure(failure: &ConformanceFailure) -> String {
    let mut reports: Vec<&ContractReport> =
        failure.reports.iter().filter(|r| !r.is_clean()).collect();
    reports.sort_by(|a, b| a.contract.cmp(&b.contract));

    let mut blocks: Vec<String> = reports
        .iter()
        .map(|r| render_contract_report(&failure.candidate, r))
        .collect();

    if !failure.conflicts.is_empty() {
        blocks.push(render_conflicts(&failure.conflicts));
    }

    blocks.join("\n\n")
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
