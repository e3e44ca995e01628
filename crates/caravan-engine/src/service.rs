//! The operation surface and its view types.
//!
//! One method per operation the shell exposes: cities, goods, player, hire,
//! dispatch, trade, reset, and the background tick. Mutating operations
//! follow one pattern: clone the locked player record, validate and mutate
//! the clone, persist it, and only then commit it back -- so a persistence
//! failure aborts the whole mutation and prior persisted state is
//! unchanged.
//!
//! Reading the player is what resolves travel: every operation that needs
//! an up-to-date roster first runs the arrival resolver, so a merchant who
//! arrived while nobody was looking is idle again before validation.

use std::collections::BTreeMap;

use caravan_market::refresh_markets;
use caravan_merchants::cargo::aggregate_inventory;
use caravan_merchants::{execute_trade, hire_first_unhired, resolve_arrivals};
use caravan_store::RecordKey;
use caravan_types::{
    CityId, CityMarket, Connection, EconomyType, GlobalNews, Good, GoodId, Player, TradeAction,
};
use caravan_world::default_player;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ServiceError;
use crate::state::SimState;

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// A city joined with its current market snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityView {
    /// City identifier.
    pub id: CityId,
    /// Human-readable city name.
    pub name: String,
    /// The city's economy type.
    pub economy_type: EconomyType,
    /// Outgoing routes.
    pub connections: Vec<Connection>,
    /// The current market; empty for cities with no recognized economy.
    pub market: CityMarket,
}

/// The player document plus everything a read should surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    /// The up-to-date player document.
    pub player: Player,
    /// Inventory aggregated across all merchants, recomputed per read.
    pub inventory: BTreeMap<GoodId, u32>,
    /// Narratives produced by travel resolution during this read.
    pub events: Vec<String>,
    /// The current global news record.
    pub news: GlobalNews,
}

/// Result of a successful mutating operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpReceipt {
    /// The updated player document.
    pub player: Player,
    /// Human-readable confirmation message.
    pub message: String,
    /// Narratives produced by travel resolution during this operation.
    pub events: Vec<String>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

impl SimState {
    /// All cities joined with the current market snapshot.
    pub async fn cities(&self) -> Vec<CityView> {
        let market = self.market.read().await;
        self.catalog
            .cities()
            .map(|city| CityView {
                id: city.id.clone(),
                name: city.name.clone(),
                economy_type: city.economy_type.clone(),
                connections: city.connections.clone(),
                market: market.markets.get(&city.id).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// The reference goods list.
    pub fn goods(&self) -> Vec<Good> {
        self.catalog.goods().cloned().collect()
    }

    /// Read the player, resolving any due arrivals first.
    ///
    /// Arrivals mutate the player, so a read that resolved at least one
    /// persists the updated document before returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if travel resolution or persistence fails.
    pub async fn player(&self, now: DateTime<Utc>) -> Result<PlayerView, ServiceError> {
        let mut guard = self.player.lock().await;
        let mut draft = guard.clone();

        let events = {
            let mut rng = self.rng.lock().await;
            resolve_arrivals(&mut draft, &self.catalog, now, &mut *rng)?
        };
        if !events.is_empty() {
            self.store.save(RecordKey::Player, &draft).await?;
            guard.clone_from(&draft);
        }
        drop(guard);

        let news = self.market.read().await.news.clone();
        Ok(PlayerView {
            inventory: aggregate_inventory(&draft),
            player: draft,
            events,
            news,
        })
    }

    /// Hire the first not-yet-hired merchant in roster order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] with kind `AllMerchantsHired` when the
    /// roster is exhausted, or a persistence failure.
    pub async fn hire(&self) -> Result<OpReceipt, ServiceError> {
        let mut guard = self.player.lock().await;
        let mut draft = guard.clone();

        let name = hire_first_unhired(&mut draft)?;
        self.store.save(RecordKey::Player, &draft).await?;
        guard.clone_from(&draft);

        Ok(OpReceipt {
            player: draft,
            message: format!("{name} joined the guild and awaits orders."),
            events: Vec::new(),
        })
    }

    /// Dispatch a merchant along a connected route.
    ///
    /// Due arrivals are resolved first, so a merchant who already reached a
    /// city can immediately be sent onward.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] for an unknown merchant, a busy merchant,
    /// a missing route, or a persistence failure.
    pub async fn dispatch(
        &self,
        merchant_name: &str,
        target: &CityId,
        now: DateTime<Utc>,
    ) -> Result<OpReceipt, ServiceError> {
        let mut guard = self.player.lock().await;
        let mut draft = guard.clone();

        let events = {
            let mut rng = self.rng.lock().await;
            resolve_arrivals(&mut draft, &self.catalog, now, &mut *rng)?
        };
        let receipt =
            caravan_merchants::dispatch(&mut draft, merchant_name, target, &self.catalog, now)?;

        self.store.save(RecordKey::Player, &draft).await?;
        guard.clone_from(&draft);

        Ok(OpReceipt {
            player: draft,
            message: receipt.message,
            events,
        })
    }

    /// Execute a buy or sell order against the merchant's current city
    /// market.
    ///
    /// The market snapshot is read once after travel resolution; a rotation
    /// landing mid-operation cannot change the prices this order fills at.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] for any validation failure of the order
    /// (unknown names, gold, stock, capacity) or a persistence failure.
    pub async fn trade(
        &self,
        merchant_name: &str,
        action: TradeAction,
        good: &GoodId,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<OpReceipt, ServiceError> {
        let mut guard = self.player.lock().await;
        let mut draft = guard.clone();

        let events = {
            let mut rng = self.rng.lock().await;
            resolve_arrivals(&mut draft, &self.catalog, now, &mut *rng)?
        };

        let city = caravan_merchants::roster::find_merchant(&draft, merchant_name)?
            .current_location
            .clone();
        let snapshot = {
            let market = self.market.read().await;
            market.markets.get(&city).cloned().unwrap_or_default()
        };

        let receipt = execute_trade(&mut draft, merchant_name, action, good, quantity, &snapshot)?;

        self.store.save(RecordKey::Player, &draft).await?;
        guard.clone_from(&draft);

        Ok(OpReceipt {
            player: draft,
            message: receipt.message,
            events,
        })
    }

    /// Restore the fixed default player document.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] on a persistence failure; the previous
    /// document stays in force.
    pub async fn reset(&self) -> Result<OpReceipt, ServiceError> {
        let mut guard = self.player.lock().await;
        let draft = default_player();

        self.store.save(RecordKey::Player, &draft).await?;
        guard.clone_from(&draft);

        tracing::info!("Player record reset to the default document");
        Ok(OpReceipt {
            player: draft,
            message: "The guild ledger was wiped clean. A fresh start.".to_owned(),
            events: Vec::new(),
        })
    }

    /// Tick the event scheduler; on rotation, recompute every market and
    /// persist the fresh news record.
    ///
    /// Returns the new news record when a rotation fired, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the market recomputation or the news
    /// write fails; the caller logs and keeps ticking.
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<Option<GlobalNews>, ServiceError> {
        let mut market = self.market.write().await;

        let rotation = {
            let mut rng = self.rng.lock().await;
            market.scheduler.maybe_rotate(now, &mut *rng)
        };
        let Some(rotation) = rotation else {
            return Ok(None);
        };

        let snapshot = {
            let mut rng = self.rng.lock().await;
            refresh_markets(&self.catalog, &self.rules, rotation.active.as_ref(), &mut *rng)?
        };
        market.markets = snapshot;
        market.news = rotation.news.clone();
        drop(market);

        self.store.save(RecordKey::News, &rotation.news).await?;
        Ok(Some(rotation.news))
    }
}
