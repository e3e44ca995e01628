//! Shared type definitions for the Caravan trading simulation.
//!
//! This crate is the single source of truth for all types used across the
//! Caravan workspace: the immutable reference catalog (goods, cities), the
//! per-refresh market snapshot, narrative market events, and the durable
//! player document with its merchant roster.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe slug wrappers for catalog identifiers
//! - [`enums`] -- Enumeration types (merchant status, trade action)
//! - [`structs`] -- Core entity structs (goods, cities, markets, merchants)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{MerchantStatus, TradeAction};
pub use ids::{CityId, EconomyType, EventId, GoodId};
pub use structs::{
    City, CityMarket, Connection, GlobalNews, Good, MarketBid, MarketEvent, MarketOffer, Merchant,
    Player,
};
