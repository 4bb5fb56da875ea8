use crate::OutputFormatter;
use tenon_engine::types::{ContractListing, VerifyReport};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_verify(&self, report: &VerifyReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }

    fn format_contract(&self, listing: &ContractListing) -> String {
        serde_json::to_string_pretty(listing).unwrap_or_default()
    }
}
