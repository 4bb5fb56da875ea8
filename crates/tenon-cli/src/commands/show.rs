use tenon_engine::engine::ConformanceEngine;
use tenon_engine::registry::ContractDecl;
use tenon_output::OutputFormatter;

use crate::manifest::Manifest;

/// Run `tenon show <manifest> <contract>` — print one contract's members.
pub fn run(formatter: &dyn OutputFormatter, manifest_path: &str, contract_name: &str) -> i32 {
    let content = match std::fs::read_to_string(manifest_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("tenon show: failed to read {}: {}", manifest_path, e);
            return 2;
        }
    };
    let manifest = match Manifest::parse(&content) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("tenon show: invalid manifest {}: {}", manifest_path, e);
            return 2;
        }
    };

    let engine = ConformanceEngine::new();
    for contract in &manifest.contracts {
        let mut decl = ContractDecl::new(contract.name.clone());
        for member in &contract.members {
            decl = decl.member(member.name.clone(), member.to_member());
        }
        if let Err(e) = engine.declare(decl) {
            eprintln!("tenon show: {}", e);
            return 2;
        }
    }

    match engine.contract(contract_name) {
        Some(contract) => {
            print!("{}", formatter.format_contract(&contract.listing()));
            0
        }
        None => {
            eprintln!(
                "tenon show: no contract named `{}` in {}",
                contract_name, manifest_path
            );
            2
        }
    }
}
