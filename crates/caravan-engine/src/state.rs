//! The [`SimState`] object and its construction.
//!
//! All process-wide mutable state lives here, behind explicit locks: the
//! event scheduler plus derived market snapshot (read by every request,
//! written only by the tick), and the player record (read and written by
//! trade, dispatch, and travel resolution). Each logical operation holds
//! the lock it needs for its whole read-modify-write, so no operation ever
//! observes a half-applied mutation.

use std::collections::BTreeMap;

use caravan_market::{EventScheduler, events, refresh_markets};
use caravan_store::{JsonFileStore, RecordKey};
use caravan_types::{City, CityId, CityMarket, GlobalNews, Good, Player};
use caravan_world::{Catalog, EconomyRules, default_catalog, default_player};
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::{Mutex, RwLock};

use crate::config::EngineConfig;
use crate::error::ServiceError;

/// Market-side shared state: the scheduler, the derived per-city market
/// snapshot, and the current news record.
#[derive(Debug)]
pub struct MarketState {
    /// The event rotation state machine.
    pub scheduler: EventScheduler,
    /// The wholesale per-city market snapshot, replaced on every rotation.
    pub markets: BTreeMap<CityId, CityMarket>,
    /// The news record describing the current market mood.
    pub news: GlobalNews,
}

/// The explicit simulation-state object every operation runs against.
///
/// Constructed once at startup; the shell shares it behind an `Arc` between
/// request handlers and the background tick loop.
pub struct SimState {
    /// Immutable reference data: goods and the city graph.
    pub(crate) catalog: Catalog,
    /// Immutable production/demand rules per economy type.
    pub(crate) rules: EconomyRules,
    /// The JSON record store backing player, reference, and news records.
    pub(crate) store: JsonFileStore,
    /// Scheduler, market snapshot, and news, guarded as one unit.
    pub(crate) market: RwLock<MarketState>,
    /// The durable player record; the store is write-through from here.
    pub(crate) player: Mutex<Player>,
    /// The single deterministic randomness source for prices, rotations,
    /// and ambush rolls.
    pub(crate) rng: Mutex<SmallRng>,
}

impl SimState {
    /// Build the simulation state from configuration.
    ///
    /// Opens the record store, loads the player record (seeding the default
    /// document on first run), seeds the reference records, and computes
    /// the initial calm market snapshot with the first rotation deadline
    /// one full period after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the default world is inconsistent, the
    /// store cannot be opened or seeded, or the rotation period is invalid.
    pub async fn new(config: &EngineConfig, now: DateTime<Utc>) -> Result<Self, ServiceError> {
        let store = JsonFileStore::open(config.storage.data_dir.clone()).await?;

        // An existing pair of reference documents wins over the built-in
        // world, so a customized world survives restarts.
        let goods_path = config.storage.data_dir.join(RecordKey::Goods.file_name());
        let cities_path = config.storage.data_dir.join(RecordKey::Cities.file_name());
        let catalog = if goods_path.exists() && cities_path.exists() {
            Catalog::from_files(&goods_path, &cities_path)?
        } else {
            default_catalog()?
        };
        let rules = EconomyRules::standard();

        let player = if store.exists(RecordKey::Player).await {
            store.load(RecordKey::Player).await?
        } else {
            let player = default_player();
            store.save(RecordKey::Player, &player).await?;
            tracing::info!(player = %player.name, "Seeded default player record");
            player
        };

        // Re-serialized from the loaded catalog so the records on disk are
        // always the validated form.
        let cities: Vec<City> = catalog.cities().cloned().collect();
        let goods: Vec<Good> = catalog.goods().cloned().collect();
        store.save(RecordKey::Cities, &cities).await?;
        store.save(RecordKey::Goods, &goods).await?;

        let mut rng = SmallRng::seed_from_u64(config.world.seed);
        let scheduler = EventScheduler::new(config.market.event_period_ms, now)?;
        let markets = refresh_markets(&catalog, &rules, None, &mut rng)?;

        let news = GlobalNews {
            id: now.timestamp_millis(),
            text: events::calm_event().message,
        };
        store.save(RecordKey::News, &news).await?;

        tracing::info!(
            cities = cities.len(),
            goods = goods.len(),
            seed = config.world.seed,
            "Simulation state assembled"
        );

        Ok(Self {
            catalog,
            rules,
            store,
            market: RwLock::new(MarketState {
                scheduler,
                markets,
                news,
            }),
            player: Mutex::new(player),
            rng: Mutex::new(rng),
        })
    }

    /// The immutable reference catalog.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
