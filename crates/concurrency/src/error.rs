//! Error types for write-once cells
//!
//! Both conditions signal caller misuse. Neither is transient, so callers
//! should not retry.

use thiserror::Error;

/// Errors raised by [`WriteOnceCell`](crate::WriteOnceCell)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    /// A second explicit write was attempted
    #[error("value \"{name}\" has already been set")]
    AlreadySet {
        /// Diagnostic name of the cell
        name: String,
    },

    /// Read attempted before any write, with no default supplied
    #[error("value \"{name}\" has not yet been set")]
    NotSet {
        /// Diagnostic name of the cell
        name: String,
    },
}

impl CellError {
    /// Diagnostic name of the cell that raised the error
    pub fn name(&self) -> &str {
        match self {
            CellError::AlreadySet { name } | CellError::NotSet { name } => name,
        }
    }
}
