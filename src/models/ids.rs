//! Strongly-typed ID wrappers for all entity types
//!
//! Ids are assigned by the document store and arrive as opaque strings.
//! Wrapping them keeps a category id from being passed where a budget id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a store-assigned identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
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

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(TransactionId);
define_id!(CategoryId);
define_id!(BudgetId);
define_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = CategoryId::new("food");
        assert_eq!(id.to_string(), "food");
        assert_eq!(id.as_str(), "food");
    }

    #[test]
    fn test_id_ordering() {
        let mut ids = vec![CategoryId::from("b"), CategoryId::from("a")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "a");
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = BudgetId::new("budget-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"budget-1\"");
        let back: BudgetId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
