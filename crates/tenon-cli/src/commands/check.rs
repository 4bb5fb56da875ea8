use std::collections::HashMap;
use std::sync::Arc;

use tenon_core::config::TenonConfig;
use tenon_core::finalized::FinalizedType;
use tenon_engine::candidate::CandidateType;
use tenon_engine::engine::ConformanceEngine;
use tenon_engine::registry::ContractDecl;
use tenon_engine::types::ConformanceError;
use tenon_output::OutputFormatter;

use crate::manifest::Manifest;

/// Run `tenon check <manifest>` — verify every candidate in the manifest.
pub fn run(formatter: &dyn OutputFormatter, manifest_path: &str) -> i32 {
    let content = match std::fs::read_to_string(manifest_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("tenon check: failed to read {}: {}", manifest_path, e);
            return 2;
        }
    };
    let manifest = match Manifest::parse(&content) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("tenon check: invalid manifest {}: {}", manifest_path, e);
            return 2;
        }
    };

    let tenon_dir = std::env::current_dir()
        .map(|d| d.join(".tenon"))
        .unwrap_or_default();
    let config = TenonConfig::load(&tenon_dir);

    match run_manifest(&manifest, config, formatter) {
        Ok((exit_code, output)) => {
            if !output.is_empty() {
                print!("{}", output);
            }
            exit_code
        }
        Err(message) => {
            eprintln!("tenon check: {}", message);
            2
        }
    }
}

/// Declare everything in the manifest and verify candidates in order.
/// Returns the exit code and the accumulated report text; a declaration
/// failure or broken reference is fatal and returned as `Err`.
pub(crate) fn run_manifest(
    manifest: &Manifest,
    config: TenonConfig,
    formatter: &dyn OutputFormatter,
) -> Result<(i32, String), String> {
    let mut engine = ConformanceEngine::with_config(config);

    for tag in &manifest.tags {
        engine
            .register_tag(tag.child.as_str(), tag.parent.as_str())
            .map_err(|e| e.to_string())?;
    }

    for contract in &manifest.contracts {
        let mut decl = ContractDecl::new(contract.name.clone());
        for member in &contract.members {
            decl = decl.member(member.name.clone(), member.to_member());
        }
        engine.declare(decl).map_err(|e| e.to_string())?;
    }

    let mut finalized: HashMap<String, Arc<FinalizedType>> = HashMap::new();
    let mut output = String::new();
    let mut failed = false;

    for candidate in &manifest.candidates {
        let mut builder = CandidateType::new(candidate.name.clone());

        if !candidate.implements.is_empty() {
            let mut contracts = Vec::new();
            for name in &candidate.implements {
                let contract = engine
                    .contract(name)
                    .ok_or_else(|| format!("unknown contract `{}`", name))?;
                contracts.push(contract);
            }
            let base = engine
                .implements_base(&contracts)
                .map_err(|e| e.to_string())?;
            builder = builder.declares(base);
        }

        if let Some(parent) = &candidate.extends {
            let parent_ty = finalized.get(parent).ok_or_else(|| {
                format!(
                    "candidate `{}` extends unknown type `{}`",
                    candidate.name, parent
                )
            })?;
            builder = builder.extends(Arc::clone(parent_ty));
        }

        for member in &candidate.members {
            builder = builder.member(member.name.clone(), member.to_member());
        }

        match engine.finalize(builder) {
            Ok(done) => {
                output.push_str(&formatter.format_verify(&done.report));
                finalized.insert(candidate.name.clone(), done.ty);
            }
            Err(ConformanceError::Unimplemented(failure)) => {
                failed = true;
                output.push_str(&formatter.format_verify(&failure.to_report()));
            }
            Err(other) => return Err(other.to_string()),
        }
    }

    Ok((if failed { 1 } else { 0 }, output))
}
