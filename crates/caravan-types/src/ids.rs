//! Type-safe slug wrappers for catalog identifiers.
//!
//! Every reference entity in the simulation is keyed by a human-readable
//! slug (`"wheat"`, `"oakhaven"`, `"famine_aethelgard"`). Wrapping each kind
//! of slug in its own newtype prevents accidental mixing of identifiers at
//! compile time -- a [`GoodId`] can never be passed where a [`CityId`] is
//! expected.
//!
//! Slugs serialize transparently as plain JSON strings, matching the
//! reference data documents.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around a slug [`String`] with standard derives.
macro_rules! define_slug {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(slug: impl Into<String>) -> Self {
                Self(slug.into())
            }

            /// Return the slug as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(slug: &str) -> Self {
                Self(slug.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(slug: String) -> Self {
                Self(slug)
            }
        }
    };
}

define_slug! {
    /// Identifier for a good in the reference catalog.
    GoodId
}

define_slug! {
    /// Identifier for a city (node in the trade-route graph).
    CityId
}

define_slug! {
    /// Identifier for a narrative market event.
    EventId
}

define_slug! {
    /// A city's production/demand profile key.
    ///
    /// Cities carry an arbitrary slug here; only types present in the
    /// economy rules table receive a generated market. Unrecognized types
    /// pass through the market generator unchanged.
    EconomyType
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn slugs_serialize_transparently() {
        let id = GoodId::new("wheat");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"wheat\"");
    }

    #[test]
    fn slug_roundtrip_serde() {
        let original = CityId::new("oakhaven");
        let json = serde_json::to_string(&original).unwrap();
        let restored: CityId = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn slug_display_matches_inner() {
        let id = EventId::from("famine_aethelgard");
        assert_eq!(id.to_string(), "famine_aethelgard");
        assert_eq!(id.as_str(), "famine_aethelgard");
    }
}
