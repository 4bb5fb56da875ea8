//! Candidate-type builder.
//!
//! A plain record of everything a type brings to verification: its own
//! members, the contract bases it declares, and an optional parent it
//! extends. Construction happens in [`crate::engine::ConformanceEngine::finalize`];
//! the builder itself performs no checking.

use std::sync::Arc;

use tenon_core::finalized::FinalizedType;
use tenon_core::member::{FunctionDecl, Member, MemberTable};

use crate::engine::ImplementsBase;

/// Builder for a type whose conformance is decided at finalize time.
#[derive(Clone, Default)]
pub struct CandidateType {
    pub(crate) name: String,
    pub(crate) members: MemberTable,
    pub(crate) bases: Vec<Arc<ImplementsBase>>,
    pub(crate) parent: Option<Arc<FinalizedType>>,
}

impl CandidateType {
    pub fn new(name: impl Into<String>) -> Self {
        CandidateType {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a plain instance method.
    pub fn method(mut self, name: impl Into<String>, decl: FunctionDecl) -> Self {
        self.members.insert(name, Member::function(decl));
        self
    }

    pub fn static_member(mut self, name: impl Into<String>, decl: FunctionDecl) -> Self {
        self.members.insert(name, Member::static_method(decl));
        self
    }

    pub fn class_method(mut self, name: impl Into<String>, decl: FunctionDecl) -> Self {
        self.members.insert(name, Member::class_method(decl));
        self
    }

    pub fn property(mut self, name: impl Into<String>, decl: FunctionDecl) -> Self {
        self.members.insert(name, Member::property(decl));
        self
    }

    /// Add a transparent adapter forwarding to another member by name.
    pub fn alias(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.members.insert(name, Member::Alias(target.into()));
        self
    }

    /// Add a plain data field; `value_kind` names what it holds.
    pub fn data(mut self, name: impl Into<String>, value_kind: impl Into<String>) -> Self {
        self.members.insert(name, Member::Data(value_kind.into()));
        self
    }

    /// Add an already-wrapped member verbatim.
    pub fn member(mut self, name: impl Into<String>, member: Member) -> Self {
        self.members.insert(name, member);
        self
    }

    /// Declare conformance to a contract base. May be called repeatedly;
    /// contract sets accumulate.
    pub fn declares(mut self, base: Arc<ImplementsBase>) -> Self {
        self.bases.push(base);
        self
    }

    /// Single-parent inheritance: the parent's effective members and
    /// contracts carry over, with this builder's own members winning.
    pub fn extends(mut self, parent: Arc<FinalizedType>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for CandidateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateType")
            .field("name", &self.name)
            .field("members", &self.members.names().collect::<Vec<_>>())
            .field(
                "bases",
                &self.bases.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .finish()
    }
}
