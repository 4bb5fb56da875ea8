//! Normalized callable shapes and shape extraction.
//!
//! [`shape_of`] reduces any declarable member to a [`CallableShape`]: its
//! call kind plus parameter lists. Wrappers are peeled outermost-in
//! (static → class-bound → property → default → plain callable); alias
//! layers are resolved through the owning [`MemberTable`] with a visited
//! set so a cyclic adapter chain fails instead of looping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::member::{FunctionDecl, Member, MemberTable, Param};
use crate::tag::TypeTag;

/// How a member is bound when called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    Instance,
    Static,
    Class,
    Property,
    /// Raw kind of an unpeeled default wrapper. Shape extraction always
    /// shapes a default through its wrapped implementation, so this kind
    /// only appears as a diagnostic label.
    Default,
}

impl CallKind {
    pub fn label(&self) -> &'static str {
        match self {
            CallKind::Instance => "instance method",
            CallKind::Static => "static method",
            CallKind::Class => "class method",
            CallKind::Property => "property",
            CallKind::Default => "default wrapper",
        }
    }

    /// Nominal subkind relation. There is no cross-kind subtyping: the
    /// relation is reflexive and nothing else.
    pub fn is_subkind_of(self, declared: CallKind) -> bool {
        self == declared
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised during shape extraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("`{name}` is a {actual}, not a callable member")]
    Unshapeable { name: String, actual: String },

    #[error("wrapper cycle while unwrapping `{name}`: {}", chain.join(" -> "))]
    CyclicWrapper { name: String, chain: Vec<String> },

    #[error("`{name}` forwards to unknown member `{target}`")]
    MissingAliasTarget { name: String, target: String },

    #[error("`{name}` forwards to `{target}` outside any member table")]
    UnresolvedAlias { name: String, target: String },

    #[error("no member named `{0}`")]
    NotFound(String),
}

/// Normalized description of a callable: kind, parameter lists, return tag.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallableShape {
    pub kind: CallKind,
    pub is_async: bool,
    pub positional: Vec<Param>,
    pub keyword_only: Vec<Param>,
    pub return_tag: Option<TypeTag>,
}

impl CallableShape {
    pub fn from_decl(kind: CallKind, decl: &FunctionDecl) -> Self {
        CallableShape {
            kind,
            is_async: decl.is_async,
            positional: decl.positional.clone(),
            keyword_only: decl.keyword_only.clone(),
            return_tag: decl.return_tag.clone(),
        }
    }

    pub fn keyword_only_by_name(&self, name: &str) -> Option<&Param> {
        self.keyword_only.iter().find(|p| p.name == name)
    }
}

impl fmt::Display for CallableShape {
    /// Renders `(a, b=..., *, c) -> T`. Keyword-only parameters are printed
    /// name-sorted since their declaration order is not significant.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_async {
            f.write_str("async ")?;
        }
        f.write_str("(")?;
        let mut first = true;
        for param in &self.positional {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
            first = false;
        }
        if !self.keyword_only.is_empty() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str("*")?;
            let mut sorted: Vec<&Param> = self.keyword_only.iter().collect();
            sorted.sort_by(|a, b| a.name.cmp(&b.name));
            for param in sorted {
                write!(f, ", {param}")?;
            }
        }
        f.write_str(")")?;
        if let Some(tag) = &self.return_tag {
            write!(f, " -> {tag}")?;
        }
        Ok(())
    }
}

/// Extract the shape of a standalone member. Alias members cannot be
/// resolved without a table; prefer [`MemberTable::shape_of`].
pub fn shape_of(member: &Member) -> Result<CallableShape, ShapeError> {
    walk("<member>", member, None).map(|(kind, decl)| CallableShape::from_decl(kind, decl))
}

impl MemberTable {
    /// Extract the shape of the named member, resolving alias chains within
    /// this table. Wrappers are inspected as objects, never evaluated.
    pub fn shape_of(&self, name: &str) -> Result<CallableShape, ShapeError> {
        let member = self
            .get(name)
            .ok_or_else(|| ShapeError::NotFound(name.to_string()))?;
        walk(name, member, Some(self)).map(|(kind, decl)| CallableShape::from_decl(kind, decl))
    }

    /// Resolve the named member down to its innermost function declaration.
    pub fn resolve_callable(&self, name: &str) -> Result<&FunctionDecl, ShapeError> {
        let member = self
            .get(name)
            .ok_or_else(|| ShapeError::NotFound(name.to_string()))?;
        walk(name, member, Some(self)).map(|(_, decl)| decl)
    }
}

/// Peel wrapper layers down to the innermost function declaration.
/// The outermost binding wrapper decides the call kind; default wrappers
/// are shaped through, so a default for a static member still yields a
/// static-method shape.
fn walk<'a>(
    name: &str,
    member: &'a Member,
    table: Option<&'a MemberTable>,
) -> Result<(CallKind, &'a FunctionDecl), ShapeError> {
    let mut kind: Option<CallKind> = None;
    let mut chain: Vec<String> = vec![name.to_string()];
    let mut current = member;
    loop {
        match current {
            Member::Static(inner) => {
                kind.get_or_insert(CallKind::Static);
                current = inner;
            }
            Member::ClassBound(inner) => {
                kind.get_or_insert(CallKind::Class);
                current = inner;
            }
            Member::Property(inner) => {
                kind.get_or_insert(CallKind::Property);
                current = inner;
            }
            Member::DefaultImpl(inner) => {
                current = inner;
            }
            Member::Alias(target) => {
                let Some(table) = table else {
                    return Err(ShapeError::UnresolvedAlias {
                        name: name.to_string(),
                        target: target.clone(),
                    });
                };
                if chain.iter().any(|seen| seen == target) {
                    chain.push(target.clone());
                    return Err(ShapeError::CyclicWrapper {
                        name: name.to_string(),
                        chain,
                    });
                }
                chain.push(target.clone());
                current = table.get(target).ok_or_else(|| {
                    ShapeError::MissingAliasTarget {
                        name: name.to_string(),
                        target: target.clone(),
                    }
                })?;
            }
            Member::Function(decl) => {
                return Ok((kind.unwrap_or(CallKind::Instance), decl));
            }
            Member::Data(value_kind) => {
                return Err(ShapeError::Unshapeable {
                    name: name.to_string(),
                    actual: format!("{value_kind} data field"),
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "shape_tests.rs"]
mod tests;
