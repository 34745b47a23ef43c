//! Value types: equality by state, not identity
//!
//! A value type supplies two hooks:
//! - `structural_eq`: compares its state with another instance of the same type
//! - `value_state`: renders its state as a canonical string
//!
//! Everything else is derived from those hooks, once, for every type:
//! - equality, including the type-erased and absent-operand pairings
//! - the hash code, `hash32(ascii(type name + state))`
//!
//! Mixing the type name into the hashed bytes keeps two different value types
//! with textually identical state apart.
//!
//! ## Comparison Pairings
//!
//! | Left | Right | Routine |
//! |------|-------|---------|
//! | `T` | `T` | [`ValueType::value_eq`] (and `==` via [`value_type!`](crate::value_type)) |
//! | `Option<&T>` | `Option<&T>` | [`values_equal`] |
//! | `T` | `&dyn Any` | [`ValueType::eq_any`] |
//! | `dyn AnyValue` | `dyn AnyValue` | `==` on the trait object, [`any_values_equal`] |
//!
//! None of them fail: absent operands, foreign types and non-value objects
//! compare unequal.
//!
//! ## Contract for Implementors
//!
//! `value_state` must agree with `structural_eq`: instances that compare
//! equal must render the same state string, otherwise equal values would
//! hash differently.

use crate::hash::{hash32, HashDigest};
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime type name without module path or generic arguments
///
/// `my_app::ids::Wrapper<u8>` becomes `Wrapper`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Bytes fed to the hasher for a value: `type_name + state`, ASCII-encoded
///
/// Each non-ASCII character becomes a single `?` byte.
pub fn state_bytes(type_name: &str, state: &str) -> Vec<u8> {
    type_name
        .chars()
        .chain(state.chars())
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

/// A type whose equality is defined by its state
pub trait ValueType: Any {
    /// Compare state with another instance of the same type
    fn structural_eq(&self, candidate: &Self) -> bool;

    /// Canonical string form of the state
    fn value_state(&self) -> String;

    /// Name mixed into the hash code; the short runtime type name by default
    fn value_type_name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    /// Value equality against another instance of the same type
    fn value_eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.structural_eq(other)
    }

    /// Value equality against an arbitrary object
    ///
    /// False unless `other` is this exact concrete type, or a `Box` of it.
    ///
    /// ```
    /// use kihon_core::ValueType;
    ///
    /// struct Code(u8);
    ///
    /// impl ValueType for Code {
    ///     fn structural_eq(&self, candidate: &Self) -> bool {
    ///         self.0 == candidate.0
    ///     }
    ///
    ///     fn value_state(&self) -> String {
    ///         self.0.to_string()
    ///     }
    /// }
    ///
    /// let boxed = Box::new(Code(7));
    /// assert!(Code(7).eq_any(&*boxed));
    /// assert!(Code(7).eq_any(&boxed));
    /// assert!(!Code(7).eq_any(&7u8));
    /// ```
    fn eq_any(&self, other: &dyn Any) -> bool
    where
        Self: Sized,
    {
        other
            .downcast_ref::<Self>()
            .or_else(|| other.downcast_ref::<Box<Self>>().map(|boxed| &**boxed))
            .map_or(false, |other| self.value_eq(other))
    }

    /// Hash code consistent with [`value_eq`](Self::value_eq)
    fn hash_code(&self) -> HashDigest {
        hash32(&state_bytes(self.value_type_name(), &self.value_state()), 0)
    }
}

/// Equality for possibly-absent values of one type
///
/// Two absent values are equal; absent and present are not.
pub fn values_equal<T: ValueType>(left: Option<&T>, right: Option<&T>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => left.value_eq(right),
        _ => false,
    }
}

/// Type-erased view of a [`ValueType`]
///
/// Implemented for every value type. `dyn AnyValue` compares and hashes by
/// value, so values of mixed types can share one collection.
pub trait AnyValue: Any {
    /// The value as `&dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// See [`ValueType::value_type_name`]
    fn dyn_type_name(&self) -> &'static str;

    /// See [`ValueType::value_state`]
    fn dyn_state(&self) -> String;

    /// See [`ValueType::hash_code`]
    fn dyn_hash_code(&self) -> HashDigest;

    /// See [`ValueType::eq_any`]
    fn dyn_eq_any(&self, other: &dyn Any) -> bool;

    /// Value equality against another erased value
    fn dyn_eq(&self, other: &dyn AnyValue) -> bool {
        self.dyn_eq_any(other.as_any())
    }
}

impl<T: ValueType> AnyValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_type_name(&self) -> &'static str {
        self.value_type_name()
    }

    fn dyn_state(&self) -> String {
        self.value_state()
    }

    fn dyn_hash_code(&self) -> HashDigest {
        self.hash_code()
    }

    fn dyn_eq_any(&self, other: &dyn Any) -> bool {
        self.eq_any(other)
    }
}

impl PartialEq for dyn AnyValue {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}

impl Eq for dyn AnyValue {}

impl Hash for dyn AnyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.dyn_hash_code().as_u32());
    }
}

impl fmt::Debug for dyn AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.dyn_type_name(), self.dyn_state())
    }
}

/// Equality for possibly-absent erased values
pub fn any_values_equal(left: Option<&dyn AnyValue>, right: Option<&dyn AnyValue>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => left.dyn_eq(right),
        _ => false,
    }
}

/// Implement `PartialEq`, `Eq` and `Hash` for value types via [`ValueType`]
///
/// Takes one or more non-generic types. Generic value types implement the
/// three traits by hand in the same way.
///
/// ```
/// use kihon_core::{value_type, ValueType};
///
/// struct Currency(String);
///
/// impl ValueType for Currency {
///     fn structural_eq(&self, candidate: &Self) -> bool {
///         self.0 == candidate.0
///     }
///
///     fn value_state(&self) -> String {
///         self.0.clone()
///     }
/// }
///
/// value_type!(Currency);
///
/// assert!(Currency("EUR".into()) == Currency("EUR".into()));
/// assert!(Some(Currency("EUR".into())) != None);
/// ```
#[macro_export]
macro_rules! value_type {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ::core::cmp::PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    $crate::ValueType::value_eq(self, other)
                }
            }

            impl ::core::cmp::Eq for $ty {}

            impl ::core::hash::Hash for $ty {
                fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                    ::core::hash::Hasher::write_u32(
                        state,
                        $crate::ValueType::hash_code(self).as_u32(),
                    );
                }
            }
        )+
    };
}

// ============================================================================
// Tests
// ============================================================================
