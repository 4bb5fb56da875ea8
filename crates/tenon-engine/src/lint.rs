//! Default-body reference lint.
//!
//! Each default declares the member names its body references (`body_refs`).
//! A reference outside the owning contract's declared members is worth a
//! warning: the default only works when the candidate happens to supply the
//! extra name. Best-effort and non-fatal; references made through an alias
//! or computed at run time are invisible here.

use tenon_core::member::Member;

use crate::registry::Contract;
use crate::types::LintWarning;

/// Warn about default bodies referencing names outside their contract.
/// Warnings come out sorted by member, then reference.
pub fn check_default_refs(contract: &Contract) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    for (member, default) in contract.defaults() {
        let Some(decl) = innermost_decl(default) else {
            continue;
        };
        for reference in &decl.body_refs {
            if !contract.declares(reference) {
                warnings.push(LintWarning {
                    contract: contract.name().to_string(),
                    member: member.clone(),
                    reference: reference.clone(),
                });
            }
        }
    }
    warnings.sort();
    warnings
}

fn innermost_decl(member: &Member) -> Option<&tenon_core::member::FunctionDecl> {
    match member {
        Member::Function(decl) => Some(decl),
        Member::Static(inner)
        | Member::ClassBound(inner)
        | Member::Property(inner)
        | Member::DefaultImpl(inner) => innermost_decl(inner),
        Member::Alias(_) | Member::Data(_) => None,
    }
}
