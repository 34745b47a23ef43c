//! Kihon - structural value equality for domain models
//!
//! Kihon provides the building blocks for value objects and identity objects:
//! types that compare by state rather than by reference, with hash codes
//! that agree with that equality.
//!
//! # Quick Start
//!
//! ```
//! use kihon::{value_type, Identity, IdentityKind, ValueType};
//!
//! struct Money {
//!     cents: i64,
//!     currency: String,
//! }
//!
//! impl ValueType for Money {
//!     fn structural_eq(&self, candidate: &Self) -> bool {
//!         self.cents == candidate.cents && self.currency == candidate.currency
//!     }
//!
//!     fn value_state(&self) -> String {
//!         format!("{}{}", self.cents, self.currency)
//!     }
//! }
//!
//! value_type!(Money);
//!
//! let a = Money { cents: 100, currency: "EUR".into() };
//! let b = Money { cents: 100, currency: "EUR".into() };
//! assert!(a == b);
//! assert_eq!(a.hash_code(), b.hash_code());
//!
//! pub enum Account {}
//! impl IdentityKind for Account {}
//!
//! let id = Identity::<Account>::new("acc-1").unwrap();
//! assert_eq!(id.value(), "acc-1");
//! assert!(Identity::<Account>::new("").is_err());
//! ```
//!
//! # Architecture
//!
//! - `kihon-core`: the hash function, the value and identity contracts
//! - `kihon-concurrency`: the write-once cell identities store their
//!   identifier in, re-exported through `kihon-core`

pub use kihon_core::*;
