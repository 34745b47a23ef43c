//! Core types and traits for Kihon
//!
//! This crate defines the structural-equality primitives used by domain
//! models:
//! - hash: 32-bit MurmurHash3, one-shot and streaming
//! - ValueType: equality by state, with hash codes consistent with equality
//! - Identity: value types whose state is one write-once identifier
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod hash;
pub mod identity;
pub mod value;

pub use error::{Error, Result};
pub use hash::{hash32, hash32_prefix, HashDigest, Murmur3BuildHasher, Murmur3Hasher};
pub use identity::{Identity, IdentityKind};
pub use value::{any_values_equal, values_equal, AnyValue, ValueType};

// Re-export the write-once cell, which identities are built on
pub use kihon_concurrency::{CellError, WriteOnceCell};
