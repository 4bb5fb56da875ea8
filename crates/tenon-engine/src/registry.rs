//! Contract declaration and eager validation.
//!
//! A [`ContractDecl`] is the mutable builder; [`Contract`] is the immutable
//! result. Every member is shaped at declaration time, so a malformed
//! contract fails where it is declared, never at first use.

use std::collections::BTreeMap;

use tenon_core::member::{Member, MemberTable};
use tenon_core::shape::CallableShape;

use crate::types::{ContractListing, DeclarationError, MemberListing};

/// Attribute names every host type carries; excluded from scanning when a
/// contract is synthesized from an existing type.
pub const HOUSEKEEPING_NAMES: &[&str] = &[
    "__doc__",
    "__module__",
    "__name__",
    "__qualname__",
    "__weakref__",
];

pub fn is_housekeeping(name: &str) -> bool {
    HOUSEKEEPING_NAMES.contains(&name)
}

/// Builder for a contract: a name plus ordered member declarations.
/// Wrap a member in [`Member::DefaultImpl`] to mark it as a default.
#[derive(Debug, Clone)]
pub struct ContractDecl {
    name: String,
    members: Vec<(String, Member)>,
}

impl ContractDecl {
    pub fn new(name: impl Into<String>) -> Self {
        ContractDecl {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn member(mut self, name: impl Into<String>, member: Member) -> Self {
        self.members.push((name.into(), member));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A declared contract: name plus the shape of every member, with
/// contract-supplied defaults kept aside for resolution. Immutable once
/// built.
#[derive(Debug, Clone)]
pub struct Contract {
    name: String,
    shapes: BTreeMap<String, CallableShape>,
    defaults: BTreeMap<String, Member>,
}

impl Contract {
    /// Shape every declared member. Housekeeping names are skipped; any
    /// unshapeable member fails the whole declaration.
    pub(crate) fn build(decl: ContractDecl) -> Result<Contract, DeclarationError> {
        let mut table = MemberTable::new();
        for (name, member) in &decl.members {
            table.insert(name.clone(), member.clone());
        }

        let mut shapes = BTreeMap::new();
        let mut defaults = BTreeMap::new();
        for (name, member) in table.iter() {
            if is_housekeeping(name) {
                continue;
            }
            let shape = table
                .shape_of(name)
                .map_err(|source| DeclarationError::Unshapeable {
                    contract: decl.name.clone(),
                    member: name.clone(),
                    source,
                })?;
            shapes.insert(name.clone(), shape);
            if member.is_default() {
                defaults.insert(name.clone(), strip_default(member).clone());
            }
        }

        Ok(Contract {
            name: decl.name,
            shapes,
            defaults,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared shape of one member.
    pub fn shape(&self, member: &str) -> Option<&CallableShape> {
        self.shapes.get(member)
    }

    /// All declared members and their shapes, name-ordered.
    pub fn shapes(&self) -> impl Iterator<Item = (&String, &CallableShape)> {
        self.shapes.iter()
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    pub fn declares(&self, member: &str) -> bool {
        self.shapes.contains_key(member)
    }

    /// The default implementation for a member, with its default wrapper
    /// already stripped so it can be installed as if candidate-defined.
    pub fn default(&self, member: &str) -> Option<&Member> {
        self.defaults.get(member)
    }

    pub fn defaults(&self) -> impl Iterator<Item = (&String, &Member)> {
        self.defaults.iter()
    }

    /// Doc block listing every member signature, one per line.
    pub fn member_docs(&self) -> String {
        let mut out = String::new();
        for (name, shape) in &self.shapes {
            out.push_str("  ");
            out.push_str(name);
            out.push_str(&shape.to_string());
            out.push('\n');
        }
        out
    }

    /// Listing for the `show` command.
    pub fn listing(&self) -> ContractListing {
        ContractListing {
            contract: self.name.clone(),
            members: self
                .shapes
                .iter()
                .map(|(name, shape)| MemberListing {
                    name: name.clone(),
                    kind: shape.kind.to_string(),
                    signature: shape.to_string(),
                    has_default: self.defaults.contains_key(name),
                })
                .collect(),
        }
    }
}

/// Peel default wrappers, leaving the member that would be installed.
fn strip_default(member: &Member) -> &Member {
    let mut current = member;
    while let Member::DefaultImpl(inner) = current {
        current = inner;
    }
    current
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
