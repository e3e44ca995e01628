//! The fixed-period event rotation state machine.
//!
//! The scheduler owns the active event (or calm) and the next rotation
//! deadline. It is ticked from a background loop roughly once a second;
//! ticks before the deadline are no-ops, and a tick at or past the deadline
//! resets the deadline a full period ahead before anything else, so at most
//! one transition can happen per period-length window.
//!
//! A rotation draws the next state at random (70% one of the non-neutral
//! catalog events, 30% calm), composes a fresh [`GlobalNews`] record, and
//! tells the caller to recompute the market snapshot with the new event.

use caravan_types::{GlobalNews, MarketEvent};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::error::MarketError;
use crate::events;

/// Default rotation period: three minutes.
pub const DEFAULT_EVENT_PERIOD_MS: u64 = 180_000;

/// Outcome of a rotation: the new active event and the news to publish.
///
/// The caller must recompute the market snapshot with `active` and persist
/// the news record.
#[derive(Debug, Clone)]
pub struct Rotation {
    /// The newly active event, or `None` for calm.
    pub active: Option<MarketEvent>,
    /// The news record describing the new state.
    pub news: GlobalNews,
}

/// The rotating narrative event state machine.
#[derive(Debug, Clone)]
pub struct EventScheduler {
    /// Rotation period.
    period: Duration,
    /// When the next rotation becomes due.
    deadline: DateTime<Utc>,
    /// The currently active event; `None` means calm.
    active: Option<MarketEvent>,
    /// The fixed event catalog drawn from on rotation.
    catalog: Vec<MarketEvent>,
}

impl EventScheduler {
    /// Create a scheduler in the calm state with the standard catalog and
    /// the first deadline one full period after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidPeriod`] if the period is zero or does
    /// not fit a signed millisecond duration.
    pub fn new(period_ms: u64, now: DateTime<Utc>) -> Result<Self, MarketError> {
        Self::with_catalog(period_ms, now, events::event_catalog())
    }

    /// Create a scheduler with an explicit event catalog (used by tests).
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidPeriod`] if the period is zero or does
    /// not fit a signed millisecond duration.
    pub fn with_catalog(
        period_ms: u64,
        now: DateTime<Utc>,
        catalog: Vec<MarketEvent>,
    ) -> Result<Self, MarketError> {
        if period_ms == 0 {
            return Err(MarketError::InvalidPeriod {
                reason: "event period must be at least 1 ms".to_owned(),
            });
        }
        let millis = i64::try_from(period_ms).map_err(|_err| MarketError::InvalidPeriod {
            reason: format!("event period {period_ms} ms exceeds i64 range"),
        })?;
        let period = Duration::milliseconds(millis);

        Ok(Self {
            period,
            deadline: now.checked_add_signed(period).unwrap_or(DateTime::<Utc>::MAX_UTC),
            active: None,
            catalog,
        })
    }

    /// The currently active event, or `None` for calm.
    pub const fn active(&self) -> Option<&MarketEvent> {
        self.active.as_ref()
    }

    /// When the next rotation becomes due.
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// The configured rotation period.
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Tick the scheduler. Returns `None` while the deadline has not been
    /// reached; otherwise rotates and returns the new state.
    pub fn maybe_rotate(&mut self, now: DateTime<Utc>, rng: &mut impl Rng) -> Option<Rotation> {
        if now < self.deadline {
            return None;
        }

        // Reset the deadline first so a long rotation cannot double-fire.
        self.deadline = now.checked_add_signed(self.period).unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.active = events::pick_next(&self.catalog, rng).cloned();

        let news = self.compose_news(now);
        match &self.active {
            Some(event) => {
                tracing::info!(event = %event.id, title = %event.title, "Market event activated");
            }
            None => tracing::info!("Markets returned to calm"),
        }

        Some(Rotation {
            active: self.active.clone(),
            news,
        })
    }

    /// Compose the news record for the current state.
    ///
    /// The `id` is the rotation timestamp in unix milliseconds, which is
    /// monotonic across rotations.
    fn compose_news(&self, now: DateTime<Utc>) -> GlobalNews {
        let minutes = self.period.num_minutes().max(1);
        let text = match &self.active {
            Some(event) => format!(
                "{}: {} Markets will stay unsettled for roughly {minutes} minutes.",
                event.title, event.message
            ),
            None => format!(
                "{} Prices should hold steady for roughly {minutes} minutes.",
                events::calm_event().message
            ),
        };
        GlobalNews {
            id: now.timestamp_millis(),
            text,
        }
    }
}
