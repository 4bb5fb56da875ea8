//! Per-contract verification against an effective member table.
//!
//! Lookup is static: wrappers are inspected as objects and never evaluated.
//! A member may land in both `mistyped` and `mismatched`; the kind check and
//! the signature check are independent.

use tenon_core::member::MemberTable;
use tenon_core::shape::ShapeError;
use tenon_core::tag::TagHierarchy;

use crate::compat;
use crate::registry::Contract;
use crate::types::{ContractReport, MismatchedMember, MissingMember, MistypedMember};

/// Diff one contract against the effective member table. Returns the report
/// plus the declared members absent from the table but covered by this
/// contract's defaults (candidate-default attributions, resolved by the
/// engine across contracts).
///
/// An unshapeable candidate member (a data field where a callable was
/// declared) is a `mistyped` entry; a broken adapter chain is a hard error.
pub fn diff_contract(
    contract: &Contract,
    table: &MemberTable,
    tags: &TagHierarchy,
    partial_annotations: bool,
) -> Result<(ContractReport, Vec<String>), ShapeError> {
    let mut report = ContractReport {
        contract: contract.name().to_string(),
        missing: Vec::new(),
        mistyped: Vec::new(),
        mismatched: Vec::new(),
    };
    let mut attributions = Vec::new();

    // Contract members iterate name-sorted, so report entries come out
    // sorted without a separate pass.
    for (name, declared) in contract.shapes() {
        if !table.contains(name) {
            if contract.default(name).is_some() {
                attributions.push(name.clone());
            } else {
                report.missing.push(MissingMember {
                    name: name.clone(),
                    declared: declared.to_string(),
                });
            }
            continue;
        }

        let actual = match table.shape_of(name) {
            Ok(shape) => shape,
            Err(ShapeError::Unshapeable { actual, .. }) => {
                report.mistyped.push(MistypedMember {
                    name: name.clone(),
                    expected: declared.kind.to_string(),
                    actual,
                });
                continue;
            }
            Err(other) => return Err(other),
        };

        if !actual.kind.is_subkind_of(declared.kind) {
            report.mistyped.push(MistypedMember {
                name: name.clone(),
                expected: declared.kind.to_string(),
                actual: actual.kind.to_string(),
            });
        }

        let diffs = compat::diff(&actual, declared, tags, partial_annotations);
        if !diffs.is_empty() {
            report.mismatched.push(MismatchedMember {
                name: name.clone(),
                declared: declared.to_string(),
                actual: actual.to_string(),
                diffs: diffs.iter().map(ToString::to_string).collect(),
            });
        }
    }

    Ok((report, attributions))
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
