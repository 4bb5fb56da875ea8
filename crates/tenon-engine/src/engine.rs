//! Conformance engine: contract registry, memoized implements-bases, and
//! candidate finalization.
//!
//! The engine owns the single `Arc<Contract>` per declared name, which makes
//! contract identity trivial: two references are the same contract iff they
//! point at the same allocation. Verification runs in two passes so defaults
//! resolved from one contract can satisfy another contract's requirement.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use tenon_core::config::TenonConfig;
use tenon_core::finalized::FinalizedType;
use tenon_core::hash::cache_key;
use tenon_core::member::MemberTable;
use tenon_core::tag::{TagError, TagHierarchy};

use crate::candidate::CandidateType;
use crate::lint;
use crate::registry::{Contract, ContractDecl, is_housekeeping};
use crate::types::{
    ConformanceError, ConformanceFailure, ContractReport, DeclarationError, DefaultConflict,
    InstalledDefault, VerifyReport,
};
use crate::verify;

/// A memoized base representing "implements these contracts". Candidates
/// accumulate bases via [`CandidateType::declares`]; the engine hands out
/// the same `Arc` for the same contract set.
#[derive(Debug)]
pub struct ImplementsBase {
    key: String,
    name: String,
    contracts: Vec<Arc<Contract>>,
    doc: String,
}

impl ImplementsBase {
    /// Canonical cache key over the contract-name set.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Generated name, e.g. `ImplementsReadable_Writable`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contracts sorted by name.
    pub fn contracts(&self) -> &[Arc<Contract>] {
        &self.contracts
    }

    /// Doc block listing every contract's member signatures.
    pub fn doc(&self) -> &str {
        &self.doc
    }
}

/// A successfully finalized candidate: the immutable type plus the
/// verification report (including non-fatal lint warnings).
#[derive(Debug, Clone)]
pub struct Finalized {
    pub ty: Arc<FinalizedType>,
    pub report: VerifyReport,
}

/// Core conformance engine. Owns the contract registry and the
/// implements-base memo cache.
pub struct ConformanceEngine {
    contracts: Mutex<HashMap<String, Arc<Contract>>>,
    memo: Mutex<HashMap<String, Arc<ImplementsBase>>>,
    tags: TagHierarchy,
    config: TenonConfig,
}

impl Default for ConformanceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConformanceEngine {
    pub fn new() -> Self {
        Self::with_config(TenonConfig::default())
    }

    /// Create an engine configured from a `TenonConfig`.
    pub fn with_config(config: TenonConfig) -> Self {
        Self {
            contracts: Mutex::new(HashMap::new()),
            memo: Mutex::new(HashMap::new()),
            tags: TagHierarchy::new(),
            config,
        }
    }

    /// Register a nominal subtype relation for variance checks.
    pub fn register_tag(
        &mut self,
        child: impl Into<tenon_core::tag::TypeTag>,
        parent: impl Into<tenon_core::tag::TypeTag>,
    ) -> Result<(), TagError> {
        self.tags.register(child, parent)
    }

    pub fn tags(&self) -> &TagHierarchy {
        &self.tags
    }

    /// Declare a contract. Validation is eager; redeclaring a name is an
    /// error even with identical members.
    pub fn declare(&self, decl: ContractDecl) -> Result<Arc<Contract>, DeclarationError> {
        let contract = Contract::build(decl)?;
        let mut contracts = self.contracts.lock().unwrap_or_else(|e| e.into_inner());
        if contracts.contains_key(contract.name()) {
            return Err(DeclarationError::DuplicateContract(
                contract.name().to_string(),
            ));
        }
        let contract = Arc::new(contract);
        contracts.insert(contract.name().to_string(), Arc::clone(&contract));
        Ok(contract)
    }

    /// Look up a declared contract by name.
    pub fn contract(&self, name: &str) -> Option<Arc<Contract>> {
        let contracts = self.contracts.lock().unwrap_or_else(|e| e.into_inner());
        contracts.get(name).cloned()
    }

    /// Synthesize a contract from an existing type's members. With no subset
    /// every non-housekeeping member is included; with no name the contract
    /// is called `<type name>Contract`.
    pub fn contract_from_existing_type(
        &self,
        ty: &FinalizedType,
        member_subset: Option<&[&str]>,
        name: Option<&str>,
    ) -> Result<Arc<Contract>, DeclarationError> {
        let contract_name = name
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}Contract", ty.name()));
        let mut decl = ContractDecl::new(contract_name);
        match member_subset {
            Some(subset) => {
                for member_name in subset {
                    let member = ty.members().get(member_name).ok_or_else(|| {
                        DeclarationError::MissingMember {
                            type_name: ty.name().to_string(),
                            member: member_name.to_string(),
                        }
                    })?;
                    decl = decl.member(*member_name, member.clone());
                }
            }
            None => {
                for (member_name, member) in ty.members().iter() {
                    if is_housekeeping(member_name) {
                        continue;
                    }
                    decl = decl.member(member_name.clone(), member.clone());
                }
            }
        }
        self.declare(decl)
    }

    /// The memoized base for a contract set. The same set (any order, with
    /// duplicates) yields the same `Arc`.
    pub fn implements_base(
        &self,
        contracts: &[Arc<Contract>],
    ) -> Result<Arc<ImplementsBase>, DeclarationError> {
        if contracts.is_empty() {
            return Err(DeclarationError::EmptyContractSet);
        }

        let mut unique: Vec<Arc<Contract>> = Vec::new();
        for contract in contracts {
            if !unique.iter().any(|u| u.name() == contract.name()) {
                unique.push(Arc::clone(contract));
            }
        }
        unique.sort_by(|a, b| a.name().cmp(b.name()));

        let names: Vec<&str> = unique.iter().map(|c| c.name()).collect();
        let key = cache_key(&names);

        let mut memo = self.memo.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(base) = memo.get(&key) {
            return Ok(Arc::clone(base));
        }

        let name = format!("Implements{}", names.join("_"));
        let doc_blocks: Vec<String> = unique
            .iter()
            .map(|c| format!("{}:\n{}", c.name(), c.member_docs()))
            .collect();
        let base = Arc::new(ImplementsBase {
            key: key.clone(),
            name,
            contracts: unique,
            doc: doc_blocks.join("\n"),
        });
        memo.insert(key, Arc::clone(&base));
        Ok(base)
    }

    /// Verify and finalize a candidate.
    ///
    /// The effective table is the parent's flat table overlaid with the
    /// candidate's own members. The contract set is the declared bases'
    /// contracts plus the parent's, first-seen order, deduplicated by name.
    /// Pass one collects default attributions; defaults with a single
    /// contributing contract are installed, two or more contributors is a
    /// hard conflict. Pass two produces the final per-contract reports
    /// against the resolved table.
    pub fn finalize(&self, builder: CandidateType) -> Result<Finalized, ConformanceError> {
        let CandidateType {
            name,
            members,
            bases,
            parent,
        } = builder;

        let mut table = match &parent {
            Some(p) => p.members().clone(),
            None => MemberTable::new(),
        };
        for (member_name, member) in members.iter() {
            table.insert(member_name.clone(), member.clone());
        }

        let mut contracts: Vec<Arc<Contract>> = Vec::new();
        for base in &bases {
            for contract in base.contracts() {
                if !contracts.iter().any(|c| c.name() == contract.name()) {
                    contracts.push(Arc::clone(contract));
                }
            }
        }
        if let Some(p) = &parent {
            // The parent's contract list is already flat, so one level of
            // lookup covers every ancestor.
            for contract_name in p.contracts() {
                if contracts.iter().any(|c| c.name() == contract_name.as_str()) {
                    continue;
                }
                let contract = self.contract(contract_name).ok_or_else(|| {
                    ConformanceError::UnknownAncestorContract(contract_name.clone())
                })?;
                contracts.push(contract);
            }
        }

        let partial = self.config.variance.partial_annotations;
        let contract_names: Vec<String> =
            contracts.iter().map(|c| c.name().to_string()).collect();

        // Pass one: default attributions per absent member.
        let mut attributions: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for contract in &contracts {
            let (_, attributed) = verify::diff_contract(contract, &table, &self.tags, partial)?;
            for member in attributed {
                attributions
                    .entry(member)
                    .or_default()
                    .push(contract.name().to_string());
            }
        }

        let mut conflicts: Vec<DefaultConflict> = Vec::new();
        let mut installed: Vec<InstalledDefault> = Vec::new();
        for (member, mut contributors) in attributions {
            if contributors.len() > 1 {
                contributors.sort();
                conflicts.push(DefaultConflict {
                    member,
                    contracts: contributors,
                });
                continue;
            }
            let contract_name = contributors.remove(0);
            let default = contracts
                .iter()
                .find(|c| c.name() == contract_name)
                .and_then(|c| c.default(&member));
            if let Some(default) = default {
                table.insert(member.clone(), default.clone());
                installed.push(InstalledDefault {
                    member,
                    contract: contract_name,
                });
            }
        }

        // Pass two: reports against the table with defaults installed.
        let mut failing: Vec<ContractReport> = Vec::new();
        for contract in &contracts {
            let (report, _) = verify::diff_contract(contract, &table, &self.tags, partial)?;
            if !report.is_clean() {
                failing.push(report);
            }
        }
        failing.sort_by(|a, b| a.contract.cmp(&b.contract));

        if !failing.is_empty() || !conflicts.is_empty() {
            return Err(ConformanceError::Unimplemented(ConformanceFailure {
                candidate: name,
                contracts_checked: contract_names,
                reports: failing,
                conflicts,
            }));
        }

        let mut lint_warnings = Vec::new();
        if self.config.lint.default_body_refs {
            for contract in &contracts {
                lint_warnings.extend(lint::check_default_refs(contract));
            }
            lint_warnings.sort();
        }

        let report = VerifyReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "check".to_string(),
            status: "ok".to_string(),
            candidate: name.clone(),
            contracts_checked: contract_names.clone(),
            installed_defaults: installed,
            failures: vec![],
            conflicts: vec![],
            lint: lint_warnings,
        };

        Ok(Finalized {
            ty: Arc::new(FinalizedType::new(name, table, contract_names)),
            report,
        })
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
