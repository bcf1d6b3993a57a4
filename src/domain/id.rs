//! Identifier types for network entities.
//!
//! Stations, lines, and routes are all identified by opaque string ids,
//! globally unique within their kind. The only validation is that an id
//! must be non-empty.

use std::fmt;

/// Error returned when parsing an invalid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {reason}")]
pub struct InvalidId {
    reason: &'static str,
}

macro_rules! impl_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        ///
        /// Ids are opaque non-empty strings. Equality and hashing follow the
        /// string value.
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse an id from a string.
            ///
            /// Returns an error if the string is empty.
            pub fn parse(s: impl Into<String>) -> Result<Self, InvalidId> {
                let s = s.into();
                if s.is_empty() {
                    return Err(InvalidId {
                        reason: "identifier cannot be empty",
                    });
                }
                Ok(Self(s))
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidId;

            fn try_from(s: String) -> Result<Self, InvalidId> {
                Self::parse(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

impl_id!(StationId, "Identifier of a station in the network.");
impl_id!(LineId, "Identifier of a line in the network.");
impl_id!(RouteId, "Identifier of a route within a line.");
