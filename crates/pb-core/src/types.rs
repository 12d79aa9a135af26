//! Core type definitions for probboard

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Accepts either a JSON string or a JSON integer and keeps its text.
///
/// The backend hands out integer primary keys; the engine treats ids as
/// opaque strings.
fn opaque_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

macro_rules! opaque_id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                opaque_id(deserializer).map($name)
            }
        }

        impl $name {
            /// Create from a string
            pub fn from_string(s: impl Into<String>) -> Self {
                $name(s.into())
            }

            /// Get the string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                $name(n.to_string())
            }
        }
    };
}

opaque_id_type!(
    /// Unique identifier for a comment
    CommentId
);

opaque_id_type!(
    /// Identifier of a user (comment or problem author)
    UserId
);

opaque_id_type!(
    /// Identifier of a problem, the container of a comment forest
    ProblemId
);

/// Monotonic reload generation counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation following this one
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
