//! Signature compatibility between an implementation and a contract member.
//!
//! `impl` is compatible with `iface` iff every valid call against `iface`
//! is also a valid call against `impl`. The relation is not symmetric:
//! an implementer may append defaulted positional parameters, add defaulted
//! keyword-only parameters, reorder keyword-only parameters, widen a
//! parameter tag to a supertype, and narrow the return tag to a subtype.
//! Nothing else is allowed.

use std::fmt;

use tenon_core::member::Param;
use tenon_core::shape::{CallKind, CallableShape};
use tenon_core::tag::TagHierarchy;

/// One element-level incompatibility between two shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureDiff {
    KindMismatch { expected: CallKind, actual: CallKind },
    AsyncMismatch { expected: bool, actual: bool },
    DroppedPositional { name: String },
    AddedPositionalRequired { name: String },
    PositionalMismatch { expected: String, actual: String },
    DroppedKeywordOnly { name: String },
    KeywordOnlyMismatch { expected: String, actual: String },
    AddedKeywordOnlyRequired { name: String },
    ReturnNotCovariant { expected: String, actual: String },
    AnnotationAsymmetry { slot: String },
}

impl fmt::Display for SignatureDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureDiff::KindMismatch { expected, actual } => {
                write!(f, "expected {expected}, found {actual}")
            }
            SignatureDiff::AsyncMismatch { expected, .. } => {
                if *expected {
                    f.write_str("expected async member, found non-async member")
                } else {
                    f.write_str("expected non-async member, found async member")
                }
            }
            SignatureDiff::DroppedPositional { name } => {
                write!(f, "required parameter `{name}` is not accepted by the implementation")
            }
            SignatureDiff::AddedPositionalRequired { name } => {
                write!(f, "added positional parameter `{name}` must carry a default")
            }
            SignatureDiff::PositionalMismatch { expected, actual } => {
                write!(f, "positional parameter `{actual}` does not satisfy `{expected}`")
            }
            SignatureDiff::DroppedKeywordOnly { name } => {
                write!(f, "keyword-only parameter `{name}` is not accepted by the implementation")
            }
            SignatureDiff::KeywordOnlyMismatch { expected, actual } => {
                write!(f, "keyword-only parameter `{actual}` does not satisfy `{expected}`")
            }
            SignatureDiff::AddedKeywordOnlyRequired { name } => {
                write!(f, "added keyword-only parameter `{name}` must carry a default")
            }
            SignatureDiff::ReturnNotCovariant { expected, actual } => {
                write!(f, "return type {actual} is not a subtype of {expected}")
            }
            SignatureDiff::AnnotationAsymmetry { slot } => {
                write!(f, "type tag on `{slot}` is present on only one side")
            }
        }
    }
}

enum PairIssue {
    Mismatch,
    OneSidedTag,
}

/// Compare one parameter pair. Name and default-ness must match exactly;
/// the implementation's tag may be the interface's tag or a supertype.
fn check_pair(
    impl_param: &Param,
    iface_param: &Param,
    tags: &TagHierarchy,
    partial_annotations: bool,
) -> Option<PairIssue> {
    if impl_param.name != iface_param.name || impl_param.has_default != iface_param.has_default {
        return Some(PairIssue::Mismatch);
    }
    match (&impl_param.tag, &iface_param.tag) {
        (Some(impl_tag), Some(iface_tag)) => {
            if tags.is_subtype(iface_tag, impl_tag) {
                None
            } else {
                Some(PairIssue::Mismatch)
            }
        }
        (None, None) => None,
        _ => {
            if partial_annotations {
                Some(PairIssue::OneSidedTag)
            } else {
                None
            }
        }
    }
}

/// Full element-level diff of `impl_shape` against `iface`. Empty iff the
/// shapes are compatible. Any single entry makes the whole comparison fail;
/// there is no partial credit.
pub fn diff(
    impl_shape: &CallableShape,
    iface: &CallableShape,
    tags: &TagHierarchy,
    partial_annotations: bool,
) -> Vec<SignatureDiff> {
    let mut diffs = Vec::new();

    if impl_shape.kind != iface.kind {
        diffs.push(SignatureDiff::KindMismatch {
            expected: iface.kind,
            actual: impl_shape.kind,
        });
    }
    if impl_shape.is_async != iface.is_async {
        diffs.push(SignatureDiff::AsyncMismatch {
            expected: iface.is_async,
            actual: impl_shape.is_async,
        });
    }

    // Positional walk, shorter side padded with absent slots.
    let longest = impl_shape.positional.len().max(iface.positional.len());
    for i in 0..longest {
        match (impl_shape.positional.get(i), iface.positional.get(i)) {
            (Some(impl_param), Some(iface_param)) => {
                match check_pair(impl_param, iface_param, tags, partial_annotations) {
                    Some(PairIssue::Mismatch) => diffs.push(SignatureDiff::PositionalMismatch {
                        expected: iface_param.to_string(),
                        actual: impl_param.to_string(),
                    }),
                    Some(PairIssue::OneSidedTag) => diffs.push(SignatureDiff::AnnotationAsymmetry {
                        slot: iface_param.name.clone(),
                    }),
                    None => {}
                }
            }
            (Some(impl_param), None) => {
                if !impl_param.has_default {
                    diffs.push(SignatureDiff::AddedPositionalRequired {
                        name: impl_param.name.clone(),
                    });
                }
            }
            (None, Some(iface_param)) => {
                diffs.push(SignatureDiff::DroppedPositional {
                    name: iface_param.name.clone(),
                });
            }
            (None, None) => unreachable!("walked past both positional lists"),
        }
    }

    // Keyword-only parameters match by name; order is irrelevant.
    for iface_param in &iface.keyword_only {
        match impl_shape.keyword_only_by_name(&iface_param.name) {
            Some(impl_param) => {
                match check_pair(impl_param, iface_param, tags, partial_annotations) {
                    Some(PairIssue::Mismatch) => diffs.push(SignatureDiff::KeywordOnlyMismatch {
                        expected: iface_param.to_string(),
                        actual: impl_param.to_string(),
                    }),
                    Some(PairIssue::OneSidedTag) => diffs.push(SignatureDiff::AnnotationAsymmetry {
                        slot: iface_param.name.clone(),
                    }),
                    None => {}
                }
            }
            None => diffs.push(SignatureDiff::DroppedKeywordOnly {
                name: iface_param.name.clone(),
            }),
        }
    }
    for impl_param in &impl_shape.keyword_only {
        if iface.keyword_only_by_name(&impl_param.name).is_none() && !impl_param.has_default {
            diffs.push(SignatureDiff::AddedKeywordOnlyRequired {
                name: impl_param.name.clone(),
            });
        }
    }

    // Return tags, when both present, must be covariant.
    match (&impl_shape.return_tag, &iface.return_tag) {
        (Some(impl_tag), Some(iface_tag)) => {
            if !tags.is_subtype(impl_tag, iface_tag) {
                diffs.push(SignatureDiff::ReturnNotCovariant {
                    expected: iface_tag.to_string(),
                    actual: impl_tag.to_string(),
                });
            }
        }
        (None, None) => {}
        _ => {
            if partial_annotations {
                diffs.push(SignatureDiff::AnnotationAsymmetry {
                    slot: "return".to_string(),
                });
            }
        }
    }

    diffs
}

/// Boolean verdict over [`diff`] with partially-annotated pairs ignored.
pub fn compatible(impl_shape: &CallableShape, iface: &CallableShape, tags: &TagHierarchy) -> bool {
    diff(impl_shape, iface, tags, false).is_empty()
}

#[cfg(test)]
#[path = "compat_tests.rs"]
mod tests;
