//! Output formatters for tenon command results.
//!
//! Two output modes:
//! - **Human** (default): plain diagnostic text; a clean run prints nothing
//! - **JSON** (`--json`): machine-readable structured output

pub mod human;
pub mod json;

use tenon_engine::types::{ContractListing, VerifyReport};

pub trait OutputFormatter {
    fn format_verify(&self, report: &VerifyReport) -> String;
    fn format_contract(&self, listing: &ContractListing) -> String;
}
