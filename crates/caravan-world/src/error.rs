//! Error types for catalog construction and loading.
//!
//! All operations that can fail return typed errors rather than panicking.

use caravan_types::{CityId, GoodId};

/// Errors that can occur while building or loading the reference catalog.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// Two goods in the catalog share the same identifier.
    #[error("duplicate good in catalog: {0}")]
    DuplicateGood(GoodId),

    /// Two cities in the catalog share the same identifier.
    #[error("duplicate city in catalog: {0}")]
    DuplicateCity(CityId),

    /// A connection points at a city that is not in the catalog.
    #[error("connection from {from} targets unknown city {target}")]
    DanglingConnection {
        /// The city the connection departs from.
        from: CityId,
        /// The missing target city.
        target: CityId,
    },

    /// Failed to read a reference data file from disk.
    #[error("failed to read reference data: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse reference data JSON.
    #[error("failed to parse reference data: {source}")]
    Parse {
        /// The underlying JSON parse error.
        #[from]
        source: serde_json::Error,
    },
}
