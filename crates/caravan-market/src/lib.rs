//! Market generation, price formula, and narrative event rotation for the
//! Caravan simulation.
//!
//! This crate is the only producer of price volatility. The
//! [`EventScheduler`] rotates a narrative supply/demand shock on a fixed
//! period; on each rotation the [`generator`] recomputes every city's
//! market wholesale from the catalog, the economy rules, and the newly
//! active event.
//!
//! # Modules
//!
//! - [`pricing`] -- The pure price formula: base price, role multiplier,
//!   event multiplier, and uniform noise, floored to whole gold.
//! - [`generator`] -- Wholesale per-city market snapshot recomputation.
//! - [`events`] -- The fixed narrative event catalog and random selection
//!   (the neutral calm entry is never drawn).
//! - [`scheduler`] -- The fixed-period rotation state machine and news
//!   composition.
//! - [`error`] -- Error types for price computation.

pub mod error;
pub mod events;
pub mod generator;
pub mod pricing;
pub mod scheduler;

// Re-export primary types at crate root.
pub use error::MarketError;
pub use events::event_catalog;
pub use generator::refresh_markets;
pub use pricing::MarketRole;
pub use scheduler::{DEFAULT_EVENT_PERIOD_MS, EventScheduler, Rotation};
