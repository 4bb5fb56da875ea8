//! Declarable members and the member table of a candidate type.
//!
//! Wrapper-ness is modeled as explicit variants rather than reflective
//! unwrapping: a static member is `Static(inner)`, a contract default is
//! `DefaultImpl(inner)`, and a transparent adapter that forwards to another
//! member of the same table is `Alias(name)`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::finalized::FinalizedType;
use crate::tag::TypeTag;

/// Runtime value passed to and returned from member bodies.
pub type Value = serde_json::Value;

/// A member body. Receives the finalized type as its receiver so that
/// default implementations can dispatch back into the candidate's own
/// members.
pub type NativeFn =
    Arc<dyn Fn(&FinalizedType, &[Value]) -> Result<Value, InvokeError> + Send + Sync>;

/// Errors raised when invoking a member on a finalized type.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("no member named `{0}`")]
    NoSuchMember(String),

    #[error("member `{0}` is not callable")]
    NotCallable(String),

    #[error("member `{0}` has no body to invoke")]
    AbstractMember(String),

    #[error("call to `{name}` failed: {message}")]
    Body { name: String, message: String },

    #[error(transparent)]
    Shape(#[from] crate::shape::ShapeError),
}

/// One parameter slot of a callable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub has_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<TypeTag>,
}

impl Param {
    /// A required parameter with no default and no tag.
    pub fn required(name: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            has_default: false,
            tag: None,
        }
    }

    /// A parameter that carries a default value.
    pub fn defaulted(name: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            has_default: true,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<TypeTag>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.tag, self.has_default) {
            (Some(tag), true) => write!(f, "{}: {} = ...", self.name, tag),
            (Some(tag), false) => write!(f, "{}: {}", self.name, tag),
            (None, true) => write!(f, "{}=...", self.name),
            (None, false) => f.write_str(&self.name),
        }
    }
}

/// The declared signature and optional body of a plain callable.
#[derive(Clone, Default)]
pub struct FunctionDecl {
    pub positional: Vec<Param>,
    pub keyword_only: Vec<Param>,
    pub return_tag: Option<TypeTag>,
    pub is_async: bool,
    /// Runtime body; `None` for signature-only declarations.
    pub body: Option<NativeFn>,
    /// Names the body references, consumed by the default-body lint.
    pub body_refs: Vec<String>,
}

impl FunctionDecl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_positional(mut self, params: Vec<Param>) -> Self {
        self.positional = params;
        self
    }

    pub fn with_keyword_only(mut self, params: Vec<Param>) -> Self {
        self.keyword_only = params;
        self
    }

    pub fn returning(mut self, tag: impl Into<TypeTag>) -> Self {
        self.return_tag = Some(tag.into());
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn with_body(
        mut self,
        body: impl Fn(&FinalizedType, &[Value]) -> Result<Value, InvokeError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.body = Some(Arc::new(body));
        self
    }

    pub fn with_refs(mut self, refs: &[&str]) -> Self {
        self.body_refs = refs.iter().map(|r| r.to_string()).collect();
        self
    }
}

impl fmt::Debug for FunctionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDecl")
            .field("positional", &self.positional)
            .field("keyword_only", &self.keyword_only)
            .field("return_tag", &self.return_tag)
            .field("is_async", &self.is_async)
            .field("body", &self.body.as_ref().map(|_| "<native fn>"))
            .field("body_refs", &self.body_refs)
            .finish()
    }
}

/// A declarable member of a contract or candidate type.
#[derive(Debug, Clone)]
pub enum Member {
    /// Plain instance-callable.
    Function(FunctionDecl),
    /// Static-member wrapper.
    Static(Box<Member>),
    /// Class-bound wrapper.
    ClassBound(Box<Member>),
    /// Computed-property wrapper.
    Property(Box<Member>),
    /// Contract-supplied default wrapper; may wrap another default.
    DefaultImpl(Box<Member>),
    /// Transparent adapter forwarding to another member of the same table.
    Alias(String),
    /// Plain data field; the string names its value kind.
    Data(String),
}

impl Member {
    pub fn function(decl: FunctionDecl) -> Self {
        Member::Function(decl)
    }

    pub fn static_method(decl: FunctionDecl) -> Self {
        Member::Static(Box::new(Member::Function(decl)))
    }

    pub fn class_method(decl: FunctionDecl) -> Self {
        Member::ClassBound(Box::new(Member::Function(decl)))
    }

    pub fn property(decl: FunctionDecl) -> Self {
        Member::Property(Box::new(Member::Function(decl)))
    }

    pub fn default_method(decl: FunctionDecl) -> Self {
        Member::DefaultImpl(Box::new(Member::Function(decl)))
    }

    pub fn default_of(inner: Member) -> Self {
        Member::DefaultImpl(Box::new(inner))
    }

    /// Is this member declared through a default wrapper?
    pub fn is_default(&self) -> bool {
        matches!(self, Member::DefaultImpl(_))
    }
}

/// Name-ordered table of members. Iteration order is deterministic.
#[derive(Debug, Clone, Default)]
pub struct MemberTable {
    members: BTreeMap<String, Member>,
}

impl MemberTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member, returning the previous member under that name.
    pub fn insert(&mut self, name: impl Into<String>, member: Member) -> Option<Member> {
        self.members.insert(name.into(), member)
    }

    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Member)> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
