use crate::OutputFormatter;
use tenon_engine::diagnostics::render_failure;
use tenon_engine::types::{ConformanceFailure, ContractListing, VerifyReport};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_verify(&self, report: &VerifyReport) -> String {
        let mut out = String::new();

        if !report.failures.is_empty() || !report.conflicts.is_empty() {
            let failure = ConformanceFailure {
                candidate: report.candidate.clone(),
                contracts_checked: report.contracts_checked.clone(),
                reports: report.failures.clone(),
                conflicts: report.conflicts.clone(),
            };
            out.push_str(&render_failure(&failure));
            out.push('\n');
        }

        for warning in &report.lint {
            out.push_str(&format!("warning: {}\n", warning));
        }

        // Summary line, only when there is something to summarize.
        if !report.failures.is_empty() || !report.conflicts.is_empty() {
            let member_problems: usize = report
                .failures
                .iter()
                .map(|r| r.missing.len() + r.mistyped.len() + r.mismatched.len())
                .sum();
            out.push_str(&format!(
                "\n{} member problem(s), {} conflict(s) in {} contract(s)\n",
                member_problems,
                report.conflicts.len(),
                report.contracts_checked.len(),
            ));
        }

        // Clean verify = empty stdout
        out
    }

    fn format_contract(&self, listing: &ContractListing) -> String {
        let mut out = format!("Contract {}:\n", listing.contract);
        for member in &listing.members {
            out.push_str(&format!(
                "  {}{} [{}]",
                member.name, member.signature, member.kind
            ));
            if member.has_default {
                out.push_str(" (default)");
            }
            out.push('\n');
        }
        out
    }
}
