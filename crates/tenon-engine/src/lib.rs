//! Conformance engine for tenon structural contracts.
//!
//! Declares contracts eagerly, compares candidate member tables against
//! them, resolves default implementations, and produces deterministic
//! aggregated diagnostics:
//! - missing: declared members absent after default resolution
//! - mistyped: members whose call kind is not a subkind of the declared kind
//! - mismatched: members whose signature fails the compatibility check
//! - conflicts: defaults supplied for the same name by multiple contracts

pub mod candidate;
pub mod compat;
pub mod diagnostics;
pub mod engine;
pub mod lint;
pub mod registry;
pub mod types;
pub mod verify;
