//! Error types for Kihon core
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//! Every variant signals caller misuse; none is worth retrying. Equality and
//! hashing never produce errors.

use kihon_concurrency::CellError;
use thiserror::Error;

/// Result type alias for Kihon core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Kihon core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument failed validation (e.g. an empty identifier)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A write-once cell was misused
    #[error(transparent)]
    Cell(#[from] CellError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_argument() {
        let err = Error::InvalidArgument("identifier cannot be empty".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid argument"));
        assert!(msg.contains("identifier cannot be empty"));
    }

    #[test]
    fn test_error_display_cell_is_transparent() {
        let err = Error::from(CellError::AlreadySet {
            name: "identifier".to_string(),
        });
        assert_eq!(err.to_string(), "value \"identifier\" has already been set");
    }

    #[test]
    fn test_error_from_cell() {
        let cell_err = CellError::NotSet {
            name: "sut".to_string(),
        };
        let err: Error = cell_err.into();
        assert!(matches!(err, Error::Cell(CellError::NotSet { .. })));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        fn returns_error() -> Result<i32> {
            Err(Error::InvalidArgument("test".to_string()))
        }

        assert_eq!(returns_result().unwrap(), 42);
        assert!(returns_error().is_err());
    }
}
