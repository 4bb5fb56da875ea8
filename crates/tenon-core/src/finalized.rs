//! Finalized candidate types and member invocation.
//!
//! A [`FinalizedType`] is the accepted output of conformance verification:
//! a flat, immutable member table (ancestor members folded in, resolved
//! defaults installed) plus the names of the contracts it satisfies.

use crate::member::{InvokeError, MemberTable, Value};
use crate::shape::ShapeError;

#[derive(Debug, Clone)]
pub struct FinalizedType {
    name: String,
    members: MemberTable,
    contracts: Vec<String>,
}

impl FinalizedType {
    /// Constructed by the conformance engine once verification passes.
    pub fn new(name: impl Into<String>, members: MemberTable, contracts: Vec<String>) -> Self {
        FinalizedType {
            name: name.into(),
            members,
            contracts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &MemberTable {
        &self.members
    }

    /// Contract names this type was verified against, in first-seen order.
    pub fn contracts(&self) -> &[String] {
        &self.contracts
    }

    pub fn implements(&self, contract: &str) -> bool {
        self.contracts.iter().any(|c| c == contract)
    }

    /// Call the named member with `self` as the receiver. Wrapper and alias
    /// layers are peeled to the innermost body; installed defaults dispatch
    /// back into this type's own members.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, InvokeError> {
        let decl = self.members.resolve_callable(name).map_err(|e| match e {
            ShapeError::NotFound(name) => InvokeError::NoSuchMember(name),
            ShapeError::Unshapeable { name, .. } => InvokeError::NotCallable(name),
            other => InvokeError::Shape(other),
        })?;
        let body = decl
            .body
            .as_ref()
            .ok_or_else(|| InvokeError::AbstractMember(name.to_string()))?;
        body(self, args)
    }
}
