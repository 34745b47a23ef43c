//! Identity types
//!
//! An identity is a value type whose whole state is one non-empty string,
//! the identifier. The identifier is written once at construction and never
//! changes afterwards.
//!
//! The concrete identity type is named by a marker implementing
//! [`IdentityKind`]:
//!
//! ```
//! use kihon_core::{Identity, IdentityKind, ValueType};
//!
//! pub enum User {}
//! impl IdentityKind for User {}
//!
//! pub enum Order {}
//! impl IdentityKind for Order {}
//!
//! pub type UserId = Identity<User>;
//! pub type OrderId = Identity<Order>;
//!
//! let user = UserId::new("42").unwrap();
//! let order = OrderId::new("42").unwrap();
//!
//! assert_eq!(user, UserId::new("42").unwrap());
//! assert_ne!(user.hash_code(), order.hash_code());
//! assert!(!user.eq_any(&order));
//! ```

use crate::error::{Error, Result};
use crate::value::{short_type_name, ValueType};
use kihon_concurrency::WriteOnceCell;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use tracing::debug;

/// Diagnostic name of the cell holding an identifier
const IDENTIFIER_CELL: &str = "identifier";

/// Marker naming a concrete identity type
pub trait IdentityKind: 'static {
    /// Name mixed into the hash code; the marker's short type name by default
    fn name() -> &'static str {
        short_type_name::<Self>()
    }
}

/// A value type whose state is a single non-empty identifier
pub struct Identity<K: IdentityKind> {
    identifier: WriteOnceCell<String>,
    kind: PhantomData<fn() -> K>,
}

impl<K: IdentityKind> Identity<K> {
    /// Create an identity
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `identifier` is empty.
    pub fn new(identifier: impl Into<String>) -> Result<Self> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            debug!(kind = K::name(), "rejected empty identifier");
            return Err(Error::InvalidArgument(format!(
                "{} identifier cannot be empty",
                K::name()
            )));
        }

        let cell = WriteOnceCell::new(IDENTIFIER_CELL);
        cell.write(identifier)?;
        Ok(Identity {
            identifier: cell,
            kind: PhantomData,
        })
    }

    /// The identifier
    pub fn value(&self) -> String {
        // Written by the constructor, so the read cannot fail
        self.identifier.read().unwrap_or_default()
    }

    /// Name of the identity kind
    pub fn kind_name(&self) -> &'static str {
        K::name()
    }
}

impl<K: IdentityKind> ValueType for Identity<K> {
    fn structural_eq(&self, candidate: &Self) -> bool {
        self.value() == candidate.value()
    }

    fn value_state(&self) -> String {
        self.value()
    }

    fn value_type_name(&self) -> &'static str {
        K::name()
    }
}

impl<K: IdentityKind> PartialEq for Identity<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value_eq(other)
    }
}

impl<K: IdentityKind> Eq for Identity<K> {}

impl<K: IdentityKind> Hash for Identity<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code().as_u32());
    }
}

impl<K: IdentityKind> Clone for Identity<K> {
    fn clone(&self) -> Self {
        Identity {
            identifier: self.identifier.clone(),
            kind: PhantomData,
        }
    }
}

impl<K: IdentityKind> fmt::Debug for Identity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(K::name()).field(&self.value()).finish()
    }
}

impl<K: IdentityKind> fmt::Display for Identity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

impl<K: IdentityKind> FromStr for Identity<K> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Identity::new(s)
    }
}

impl<K: IdentityKind> TryFrom<String> for Identity<K> {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Identity::new(value)
    }
}

impl<K: IdentityKind> TryFrom<&str> for Identity<K> {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Identity::new(value)
    }
}

impl<K: IdentityKind> Serialize for Identity<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value())
    }
}

impl<'de, K: IdentityKind> Deserialize<'de> for Identity<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let identifier = String::deserialize(deserializer)?;
        Identity::new(identifier).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
