//! Error types for record I/O.

/// Errors that can occur while loading or saving a record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying file read, write, or rename failed.
    #[error("record I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The record could not be serialized or deserialized.
    #[error("record (de)serialization failed: {source}")]
    Serde {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
