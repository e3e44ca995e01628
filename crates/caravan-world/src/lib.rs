//! Reference catalog, trade-route graph, and economy rules for the Caravan
//! simulation.
//!
//! This crate models the immutable world: goods with base prices, cities as
//! nodes in a directed weighted graph with per-edge travel distance and
//! ambush risk, and the static table mapping each economy type to the goods
//! it produces and demands.
//!
//! # Modules
//!
//! - [`catalog`] -- The [`Catalog`]: goods and cities indexed by slug, with
//!   connection lookup between cities.
//! - [`economy`] -- The [`EconomyRules`] table: economy type to
//!   production/demand profile.
//! - [`error`] -- Error types for catalog construction and loading.
//! - [`default_world`] -- The default goods, cities, and player document
//!   used for first-run seeding and reset.

pub mod catalog;
pub mod default_world;
pub mod economy;
pub mod error;

// Re-export primary types at crate root.
pub use catalog::Catalog;
pub use default_world::{
    DEFAULT_MERCHANT_CAPACITY, STARTING_GOLD, default_catalog, default_cities, default_goods,
    default_player, starting_city,
};
pub use economy::{EconomyProfile, EconomyRules};
pub use error::WorldError;
