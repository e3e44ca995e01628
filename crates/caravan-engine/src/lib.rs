//! Simulation engine for the Caravan trading game.
//!
//! This crate wires the reference catalog, the market generator, the event
//! scheduler, the merchant operations, and the record store into one
//! explicit simulation-state object, [`SimState`]. Every operation the
//! surrounding shell exposes (cities, goods, player, hire, dispatch, trade,
//! reset) is a method on that object; nothing lives in ambient process-wide
//! state. A background tick loop drives the event rotation.
//!
//! # Modules
//!
//! - [`config`] -- Typed YAML configuration and its loader.
//! - [`state`] -- The [`SimState`] object and its construction.
//! - [`service`] -- The operation surface and its view types.
//! - [`error`] -- The service error taxonomy.

pub mod config;
pub mod error;
pub mod service;
pub mod state;

// Re-export primary types at crate root.
pub use config::EngineConfig;
pub use error::{ErrorKind, ServiceError};
pub use service::{CityView, OpReceipt, PlayerView};
pub use state::SimState;
