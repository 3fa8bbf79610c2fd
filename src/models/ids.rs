//! Strongly-typed ID wrappers for all entity types
//!
//! Ids are positive integers allocated by the storage table of each resource.
//! Newtype wrappers prevent accidentally mixing up ids from different entity
//! types at compile time while still serializing as plain JSON numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Common behaviour of record ids, used by the generic storage table
pub trait RecordId: Copy + Eq + Ord + std::hash::Hash + fmt::Display {
    /// Wrap a raw integer id
    fn from_raw(raw: i64) -> Self;

    /// The raw integer id
    fn value(&self) -> i64;
}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create an ID from a raw integer
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the underlying integer
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl RecordId for $name {
            fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            /// Accepts "42" as well as the prefixed form "exp-42"
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(UserId, "usr-");
define_id!(ExpenseId, "exp-");
define_id!(IncomeId, "inc-");
define_id!(PaymentId, "pay-");
define_id!(SavingId, "sav-");
define_id!(ActivityId, "act-");
