//! Whole-document JSON record store for the Caravan simulation.
//!
//! Persistence in this system is deliberately simple: four named records
//! (cities, goods, player, news), each read and written as a complete JSON
//! document with last-write-wins semantics. The store guarantees that a
//! write either lands completely or not at all -- documents are written to
//! a temporary file and renamed over the target, so no reader ever observes
//! a truncated record, even across a crash mid-write.
//!
//! # Modules
//!
//! - [`json_store`] -- The [`JsonFileStore`] and its [`RecordKey`] space.
//! - [`error`] -- Error types for record I/O.

pub mod error;
pub mod json_store;

// Re-export primary types at crate root.
pub use error::StoreError;
pub use json_store::{JsonFileStore, RecordKey};
