//! Strongly-typed ID wrappers for budget entities
//!
//! Ids are opaque strings on disk so that any previously persisted id stays
//! valid. Fresh ids are an entity prefix followed by a random v4 UUID token,
//! which is collision resistant without any coordination between months.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new random ID
            pub fn new() -> Self {
                Self(format!("{}{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Wrap an existing id string as-is
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the id as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Short form for display: the prefix plus the first 8 token characters
            pub fn short(&self) -> &str {
                let len = $prefix.len() + 8;
                match self.0.get(..len) {
                    Some(short) if self.0.starts_with($prefix) => short,
                    _ => &self.0,
                }
            }

            /// Check whether this id matches user input, in full or short form
            pub fn matches(&self, input: &str) -> bool {
                let input = input.trim();
                !input.is_empty() && (self.0 == input || self.short() == input)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

define_id!(CategoryId, "cat-");
define_id!(ExpenseId, "exp-");
