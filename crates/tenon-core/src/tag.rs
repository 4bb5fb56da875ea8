//! Nominal type tags and the subtype hierarchy used for variance checks.
//!
//! Tags are plain names; subtyping is a single-parent chain registered at
//! load time. The hierarchy is consulted only by the signature-compatibility
//! check (parameter contravariance, return covariance).

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A nominal type tag attached to a parameter or return slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    pub fn new(name: impl Into<String>) -> Self {
        TypeTag(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeTag {
    fn from(name: &str) -> Self {
        TypeTag(name.to_string())
    }
}

impl From<String> for TypeTag {
    fn from(name: String) -> Self {
        TypeTag(name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised while building a [`TagHierarchy`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("type tag `{child}` already has parent `{existing}`")]
    AlreadyRegistered { child: String, existing: String },

    #[error("registering `{child}` under `{parent}` would create a tag cycle")]
    Cycle { child: String, parent: String },
}

/// Single-parent nominal subtype hierarchy.
///
/// `is_subtype` is reflexive and transitive; unregistered tags are only
/// subtypes of themselves.
#[derive(Debug, Clone, Default)]
pub struct TagHierarchy {
    parents: HashMap<String, String>,
}

impl TagHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `child` as a direct subtype of `parent`.
    pub fn register(
        &mut self,
        child: impl Into<TypeTag>,
        parent: impl Into<TypeTag>,
    ) -> Result<(), TagError> {
        let child = child.into();
        let parent = parent.into();

        if let Some(existing) = self.parents.get(child.name()) {
            return Err(TagError::AlreadyRegistered {
                child: child.name().to_string(),
                existing: existing.clone(),
            });
        }

        // Walking up from the prospective parent must never reach the child.
        let mut cursor = parent.name();
        loop {
            if cursor == child.name() {
                return Err(TagError::Cycle {
                    child: child.name().to_string(),
                    parent: parent.name().to_string(),
                });
            }
            match self.parents.get(cursor) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        self.parents
            .insert(child.name().to_string(), parent.name().to_string());
        Ok(())
    }

    /// Is `sub` the same tag as `sup`, or a (transitive) subtype of it?
    pub fn is_subtype(&self, sub: &TypeTag, sup: &TypeTag) -> bool {
        let mut cursor = sub.name();
        loop {
            if cursor == sup.name() {
                return true;
            }
            match self.parents.get(cursor) {
                Some(next) => cursor = next,
                None => return false,
            }
        }
    }
}
