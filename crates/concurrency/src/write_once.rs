//! Write-once cell
//!
//! A `WriteOnceCell` moves through two states:
//!
//! ```text
//! Unset ──write(v)──> Set
//! ```
//!
//! `Set` is terminal. A cell built with a default is still `Unset`, but reads
//! succeed immediately and return the default. The default never counts as a
//! write: exactly one explicit write is still accepted, and it replaces the
//! default.
//!
//! ## Thread Safety
//!
//! A single `parking_lot::Mutex` guards the set flag and the stored value.
//! Every read and write takes that lock, so once `write` returns `Ok`, every
//! later read on any thread observes the written value. Lock hold time is
//! constant; no operation blocks beyond lock acquisition.

use crate::error::CellError;
use parking_lot::Mutex;
use std::fmt;
use tracing::{debug, warn};

struct Slot<V> {
    value: Option<V>,
    set: bool,
}

/// A named slot that accepts exactly one explicit write
///
/// # Example
///
/// ```
/// use kihon_concurrency::{CellError, WriteOnceCell};
///
/// let cell = WriteOnceCell::with_default("retries", 3);
/// assert_eq!(cell.read(), Ok(3));
///
/// cell.write(5).unwrap();
/// assert_eq!(cell.read(), Ok(5));
///
/// assert!(matches!(cell.write(7), Err(CellError::AlreadySet { .. })));
/// ```
pub struct WriteOnceCell<V> {
    name: String,
    has_default: bool,
    slot: Mutex<Slot<V>>,
}

impl<V> WriteOnceCell<V> {
    /// Create an empty cell; reads fail until the first write
    pub fn new(name: impl Into<String>) -> Self {
        WriteOnceCell {
            name: name.into(),
            has_default: false,
            slot: Mutex::new(Slot {
                value: None,
                set: false,
            }),
        }
    }

    /// Create a cell whose reads return `default` until the first write
    pub fn with_default(name: impl Into<String>, default: V) -> Self {
        WriteOnceCell {
            name: name.into(),
            has_default: true,
            slot: Mutex::new(Slot {
                value: Some(default),
                set: false,
            }),
        }
    }

    /// Diagnostic name given at construction
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a default was supplied at construction
    #[inline]
    pub fn has_default(&self) -> bool {
        self.has_default
    }

    /// Whether the one explicit write has happened
    pub fn is_set(&self) -> bool {
        self.slot.lock().set
    }

    /// Store `value`, consuming the cell's single write
    ///
    /// # Errors
    ///
    /// Returns `CellError::AlreadySet` if a write already happened. The stored
    /// value is left untouched in that case.
    pub fn write(&self, value: V) -> Result<(), CellError> {
        let mut slot = self.slot.lock();
        if slot.set {
            warn!(cell = %self.name, "rejected second write to write-once cell");
            return Err(CellError::AlreadySet {
                name: self.name.clone(),
            });
        }
        slot.set = true;
        slot.value = Some(value);
        debug!(
            cell = %self.name,
            replaced_default = self.has_default,
            "write-once cell set"
        );
        Ok(())
    }
}

impl<V: Clone> WriteOnceCell<V> {
    /// Current value: the written one, otherwise the default
    ///
    /// # Errors
    ///
    /// Returns `CellError::NotSet` if neither a default nor a write exists.
    pub fn read(&self) -> Result<V, CellError> {
        let slot = self.slot.lock();
        match slot.value.as_ref() {
            Some(value) => Ok(value.clone()),
            None => {
                warn!(cell = %self.name, "read of unset write-once cell");
                Err(CellError::NotSet {
                    name: self.name.clone(),
                })
            }
        }
    }

    /// Apply `f` to a snapshot of the current value
    ///
    /// The value is cloned under the lock and `f` runs after it is released,
    /// so `f` may itself read or write this cell.
    ///
    /// # Errors
    ///
    /// Returns `CellError::NotSet` if neither a default nor a write exists.
    pub fn with_value<R>(&self, f: impl FnOnce(&V) -> R) -> Result<R, CellError> {
        let value = self.read()?;
        Ok(f(&value))
    }
}

impl<V: Clone> Clone for WriteOnceCell<V> {
    fn clone(&self) -> Self {
        let slot = self.slot.lock();
        WriteOnceCell {
            name: self.name.clone(),
            has_default: self.has_default,
            slot: Mutex::new(Slot {
                value: slot.value.clone(),
                set: slot.set,
            }),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for WriteOnceCell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("WriteOnceCell")
            .field("name", &self.name)
            .field("has_default", &self.has_default)
            .field("set", &slot.set)
            .field("value", &slot.value)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
