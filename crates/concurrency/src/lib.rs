//! Concurrency primitives for Kihon
//!
//! This crate provides the one piece of shared mutable state the value layer
//! needs:
//! - WriteOnceCell: a named slot that accepts exactly one explicit write,
//!   optionally readable through a default before that write
//! - CellError: misuse conditions reported by the cell

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod write_once;

pub use error::CellError;
pub use write_once::WriteOnceCell;
