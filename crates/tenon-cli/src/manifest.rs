//! JSON manifest describing tags, contracts, and candidate types.
//!
//! The manifest is signature-level: member bodies cannot be expressed in
//! JSON, so manifest-declared defaults install as abstract members. The
//! `references` list still feeds the default-body lint.

use serde::Deserialize;

use tenon_core::member::{FunctionDecl, Member, Param};

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub tags: Vec<TagDecl>,
    #[serde(default)]
    pub contracts: Vec<ContractManifest>,
    #[serde(default)]
    pub candidates: Vec<CandidateManifest>,
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Manifest, serde_json::Error> {
        serde_json::from_str(content)
    }
}

/// One nominal subtype edge: `child` is a subtype of `parent`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagDecl {
    pub child: String,
    pub parent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractManifest {
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberManifest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateManifest {
    pub name: String,
    /// Contract names this candidate declares.
    #[serde(default)]
    pub implements: Vec<String>,
    /// Name of an earlier candidate to inherit from.
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberManifest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    #[default]
    Instance,
    Static,
    Class,
    Property,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberManifest {
    pub name: String,
    #[serde(default)]
    pub kind: MemberKind,
    #[serde(default)]
    pub params: Vec<ParamManifest>,
    #[serde(default)]
    pub keyword_only: Vec<ParamManifest>,
    #[serde(default)]
    pub returns: Option<String>,
    #[serde(default)]
    pub is_async: bool,
    /// Declare this member as a contract-supplied default.
    #[serde(default)]
    pub default: bool,
    /// Member names the default's body references.
    #[serde(default)]
    pub references: Vec<String>,
    /// Alias member: forwards to another member of the same table.
    #[serde(default)]
    pub alias_of: Option<String>,
    /// Data member: names the value kind it holds.
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParamManifest {
    pub name: String,
    #[serde(default)]
    pub has_default: bool,
    #[serde(default)]
    pub tag: Option<String>,
}

fn to_param(p: &ParamManifest) -> Param {
    let param = if p.has_default {
        Param::defaulted(p.name.as_str())
    } else {
        Param::required(p.name.as_str())
    };
    match &p.tag {
        Some(tag) => param.with_tag(tag.as_str()),
        None => param,
    }
}

impl MemberManifest {
    /// Lower a manifest member to a core [`Member`]. Alias and data members
    /// ignore the signature fields.
    pub fn to_member(&self) -> Member {
        if let Some(target) = &self.alias_of {
            return Member::Alias(target.clone());
        }
        if let Some(value_kind) = &self.data {
            return Member::Data(value_kind.clone());
        }

        let mut decl = FunctionDecl::new()
            .with_positional(self.params.iter().map(to_param).collect())
            .with_keyword_only(self.keyword_only.iter().map(to_param).collect());
        if let Some(tag) = &self.returns {
            decl = decl.returning(tag.as_str());
        }
        if self.is_async {
            decl = decl.asynchronous();
        }
        if !self.references.is_empty() {
            let refs: Vec<&str> = self.references.iter().map(String::as_str).collect();
            decl = decl.with_refs(&refs);
        }

        let member = match self.kind {
            MemberKind::Instance => Member::function(decl),
            MemberKind::Static => Member::static_method(decl),
            MemberKind::Class => Member::class_method(decl),
            MemberKind::Property => Member::property(decl),
        };
        if self.default {
            Member::default_of(member)
        } else {
            member
        }
    }
}
