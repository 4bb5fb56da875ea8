use super::*;
use crate::types::{MismatchedMember, MissingMember, MistypedMember};

fn report(contract: &str) -> ContractReport {
    ContractReport {
        contract: contract.to_string(),
        missing: vec![],
        mistyped: vec![],
        mismatched: vec![],
    }
}

#[test]
fn test_missing_section_exact_text() {
    let mut r = report("Duck");
    r.missing.push(MissingMember {
        name: "quack".to_string(),
        declared: "()".to_string(),
    });
    r.missing.push(MissingMember {
        name: "walk".to_string(),
        declared: "(speed)".to_string(),
    });

    assert_eq!(
        render_contract_report("Robot", &r),
        "class Robot failed to implement contract Duck:\n\
         \n\
         The following members of Duck were not implemented:\n\
         \x20 - quack()\n\
         \x20 - walk(speed)"
    );
}

#[test]
fn test_all_sections_ordered() {
    let mut r = report("Shape");
    r.missing.push(MissingMember {
        name: "perimeter".to_string(),
        declared: "()".to_string(),
    });
    r.mistyped.push(MistypedMember {
        name: "area".to_string(),
        expected: "property".to_string(),
        actual: "instance method".to_string(),
    });
    r.mismatched.push(MismatchedMember {
        name: "scale".to_string(),
        declared: "(factor)".to_string(),
        actual: "(factor, origin)".to_string(),
        diffs: vec!["added positional parameter `origin` must carry a default".to_string()],
    });

    let text = render_contract_report("Square", &r);
    let missing_at = text.find("were not implemented").unwrap();
    let mistyped_at = text.find("incorrect kinds").unwrap();
    let mismatched_at = text.find("invalid signatures").unwrap();
    assert!(missing_at < mistyped_at && mistyped_at < mismatched_at);
    assert!(text.contains("  - area: instance method is not a subkind of expected kind property"));
    assert!(text.contains("  - scale(factor, origin) != scale(factor)"));
}

#[test]
fn test_failure_sorts_contracts_and_appends_conflicts() {
    let mut zeta = report("Zeta");
    zeta.missing.push(MissingMember {
        name: "z".to_string(),
        declared: "()".to_string(),
    });
    let mut alpha = report("Alpha");
    alpha.missing.push(MissingMember {
        name: "a".to_string(),
        declared: "()".to_string(),
    });

    let failure = ConformanceFailure {
        candidate: "C".to_string(),
        contracts_checked: vec!["Zeta".to_string(), "Alpha".to_string()],
        reports: vec![zeta, alpha],
        conflicts: vec![DefaultConflict {
            member: "shared".to_string(),
            contracts: vec!["Alpha".to_string(), "Zeta".to_string()],
        }],
    };

    let text = render_failure(&failure);
    let alpha_at = text.find("contract Alpha").unwrap();
    let zeta_at = text.find("contract Zeta").unwrap();
    assert!(alpha_at < zeta_at);
    assert!(text.ends_with(
        "The following default members are supplied by multiple contracts:\n\
         \x20 - shared: defaulted by Alpha, Zeta"
    ));
    // Blocks are separated by a blank line.
    assert!(text.contains("- a()\n\nclass C failed to implement contract Zeta:"));
}

#[test]
fn test_clean_reports_are_skipped() {
    let mut zeta = report("Zeta");
    zeta.missing.push(MissingMember {
        name: "z".to_string(),
        declared: "()".to_string(),
    });
    let failure = ConformanceFailure {
        candidate: "C".to_string(),
        contracts_checked: vec!["Alpha".to_string(), "Zeta".to_string()],
        reports: vec![report("Alpha"), zeta],
        conflicts: vec![],
    };
    let text = render_failure(&failure);
    assert!(!text.contains("Alpha"));
    assert!(text.contains("Zeta"));
}

#[test]
fn test_rendering_is_idempotent() {
    let mut r = report("I");
    r.mismatched.push(MismatchedMember {
        name: "m".to_string(),
        declared: "(a, b)".to_string(),
        actual: "(a)".to_string(),
        diffs: vec!["required parameter `b` is not accepted by the implementation".to_string()],
    });
    let failure = ConformanceFailure {
        candidate: "C".to_string(),
        contracts_checked: vec!["I".to_string()],
        reports: vec![r],
        conflicts: vec![],
    };
    assert_eq!(render_failure(&failure), render_failure(&failure));
}
