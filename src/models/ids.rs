//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Build a stable ID from a small integer (sample data).
            /// The seed occupies the leading 32 bits so short forms stay distinct.
            pub fn from_seed(seed: u32) -> Self {
                Self(Uuid::from_u128((seed as u128) << 96))
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short form shown in tables ("goal-1a2b3c4d")
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// Whether `s` matches this ID in full or short form
            pub fn matches(&self, s: &str) -> bool {
                let s = s.trim();
                if s.eq_ignore_ascii_case(&self.short()) {
                    return true;
                }
                if Uuid::parse_str(s).map_or(false, |u| u == self.0) {
                    return true;
                }
                let bare = s.strip_prefix($display_prefix).unwrap_or(s);
                bare.len() >= 8 && self.0.simple().to_string().starts_with(&bare.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.short())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(RecordId, "rec-");
define_id!(GoalId, "goal-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = GoalId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("goal-"));
        assert_eq!(display.len(), 13);
    }

    #[test]
    fn test_seeded_ids_are_stable() {
        assert_eq!(RecordId::from_seed(3), RecordId::from_seed(3));
        assert_ne!(RecordId::from_seed(3), RecordId::from_seed(4));
        assert_eq!(GoalId::from_seed(1).short(), "goal-00000001");
    }

    #[test]
    fn test_matches_short_and_full() {
        let id = GoalId::new();
        assert!(id.matches(&id.short()));
        assert!(id.matches(&id.as_uuid().simple().to_string()));
        assert!(id.matches(&id.as_uuid().to_string()));
        assert!(!id.matches("goal-"));
        assert!(!id.matches("Emergency Fund"));
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: RecordId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_id_serialization() {
        let id = RecordId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
