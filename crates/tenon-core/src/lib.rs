//! Core data model for tenon structural-conformance checking.
//!
//! This crate provides the foundational data structures used across all tenon crates:
//! - [`tag`] — Nominal type tags and the subtype hierarchy used for variance checks
//! - [`member`] — Declarable members, member tables, and runtime bodies
//! - [`shape`] — Normalized callable shapes and shape extraction
//! - [`finalized`] — Finalized candidate types and member invocation
//! - [`hash`] — Deterministic cache keys (base62 of xxhash64)
//! - [`config`] — Configuration loading from `.tenon/tenon.json`

pub mod config;
pub mod finalized;
pub mod hash;
pub mod member;
pub mod shape;
pub mod tag;
