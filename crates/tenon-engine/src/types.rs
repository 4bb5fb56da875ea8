use serde::{Deserialize, Serialize};

use tenon_core::shape::ShapeError;

/// Result of verifying one candidate type, for formatters and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyReport {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "error"
    pub candidate: String,
    pub contracts_checked: Vec<String>,
    pub installed_defaults: Vec<InstalledDefault>,
    pub failures: Vec<ContractReport>,
    pub conflicts: Vec<DefaultConflict>,
    pub lint: Vec<LintWarning>,
}

/// A default implementation resolved onto the candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledDefault {
    pub member: String,
    pub contract: String,
}

/// One contract's diff against a candidate member table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractReport {
    pub contract: String,
    pub missing: Vec<MissingMember>,
    pub mistyped: Vec<MistypedMember>,
    pub mismatched: Vec<MismatchedMember>,
}

impl ContractReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.mistyped.is_empty() && self.mismatched.is_empty()
    }
}

/// A declared member the candidate does not supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingMember {
    pub name: String,
    /// Rendered declared signature, e.g. `(a, b=...)`.
    pub declared: String,
}

/// A member present with the wrong call kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistypedMember {
    pub name: String,
    pub expected: String,
    pub actual: String,
}

/// A member present with an incompatible signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchedMember {
    pub name: String,
    pub declared: String,
    pub actual: String,
    /// Element-level diffs, already rendered.
    pub diffs: Vec<String>,
}

/// Two or more contracts supplied a default for the same member and the
/// candidate did not override it. Contributing contracts are name-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultConflict {
    pub member: String,
    pub contracts: Vec<String>,
}

/// Non-fatal warning: a default body references a name outside its contract.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LintWarning {
    pub contract: String,
    pub member: String,
    pub reference: String,
}

impl std::fmt::Display for LintWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "default `{}.{}` references `{}` which is not part of the contract",
            self.contract, self.member, self.reference
        )
    }
}

/// Listing of a contract's declared members, for `tenon show`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractListing {
    pub contract: String,
    pub members: Vec<MemberListing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberListing {
    pub name: String,
    pub kind: String,
    pub signature: String,
    pub has_default: bool,
}

/// Structured payload of a failed verification: every failing contract's
/// report plus all default conflicts, both name-sorted. `contracts_checked`
/// is the full checked set, not just the failing contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceFailure {
    pub candidate: String,
    pub contracts_checked: Vec<String>,
    pub reports: Vec<ContractReport>,
    pub conflicts: Vec<DefaultConflict>,
}

impl ConformanceFailure {
    /// Build an error-status report for formatters.
    pub fn to_report(&self) -> VerifyReport {
        VerifyReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "check".to_string(),
            status: "error".to_string(),
            candidate: self.candidate.clone(),
            contracts_checked: self.contracts_checked.clone(),
            installed_defaults: vec![],
            failures: self.reports.clone(),
            conflicts: self.conflicts.clone(),
            lint: vec![],
        }
    }
}

/// Errors raised at contract-declaration time. Contracts are validated
/// eagerly, never at first use.
#[derive(Debug, thiserror::Error)]
pub enum DeclarationError {
    #[error("couldn't parse signature for member {contract}.{member}: {source}")]
    Unshapeable {
        contract: String,
        member: String,
        source: ShapeError,
    },

    #[error("contract `{0}` is already declared")]
    DuplicateContract(String),

    #[error("implements() requires at least one contract")]
    EmptyContractSet,

    #[error("type `{type_name}` has no member `{member}`")]
    MissingMember { type_name: String, member: String },
}

/// Errors raised at candidate-construction time.
#[derive(Debug, thiserror::Error)]
pub enum ConformanceError {
    #[error("{}", crate::diagnostics::render_failure(.0))]
    Unimplemented(ConformanceFailure),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("unknown contract `{0}` on ancestor type")]
    UnknownAncestorContract(String),
}

impl ConformanceError {
    /// The structured failure, when this error carries one.
    pub fn failure(&self) -> Option<&ConformanceFailure> {
        match self {
            ConformanceError::Unimplemented(f) => Some(f),
            _ => None,
        }
    }
}
