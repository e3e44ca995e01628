//! The service error taxonomy.
//!
//! Every operation surfaces failures as a [`ServiceError`] carrying the
//! underlying cause; [`ServiceError::kind`] collapses causes into the small
//! taxonomy the shell reports to clients. No error crosses the service
//! boundary as a panic.

use caravan_market::MarketError;
use caravan_merchants::MerchantError;
use caravan_store::StoreError;
use caravan_world::WorldError;

/// Stable error classification reported to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown merchant, good, route, or reference record; also malformed
    /// input such as a zero quantity.
    NotFound,
    /// The player cannot afford the purchase.
    InsufficientFunds,
    /// The market does not stock the requested quantity.
    InsufficientStock,
    /// The order would overload the merchant's wagon.
    CapacityExceeded,
    /// Every roster merchant is already hired.
    AllMerchantsHired,
    /// The merchant is already traveling and cannot take orders.
    MerchantNotFree,
    /// A record read or write failed; the operation's mutation was
    /// abandoned and prior persisted state is unchanged.
    PersistenceFailure,
    /// An internal computation failed (overflow, invalid reference data).
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable name for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InsufficientFunds => "insufficient_funds",
            Self::InsufficientStock => "insufficient_stock",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::AllMerchantsHired => "all_merchants_hired",
            Self::MerchantNotFree => "merchant_not_free",
            Self::PersistenceFailure => "persistence_failure",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by simulation service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A merchant operation (trade, dispatch, hire, travel) failed.
    #[error(transparent)]
    Merchant(#[from] MerchantError),

    /// A market computation failed.
    #[error(transparent)]
    Market(#[from] MarketError),

    /// Reference data was invalid.
    #[error(transparent)]
    World(#[from] WorldError),

    /// A record load or save failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Classify this error into the shell-facing taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Merchant(cause) => match cause {
                MerchantError::MerchantNotFound(_)
                | MerchantError::RouteNotFound { .. }
                | MerchantError::GoodNotFound { .. }
                | MerchantError::InvalidQuantity => ErrorKind::NotFound,
                MerchantError::MerchantNotFree { .. } => ErrorKind::MerchantNotFree,
                MerchantError::InsufficientGold { .. } => ErrorKind::InsufficientFunds,
                MerchantError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
                MerchantError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
                MerchantError::AllMerchantsHired => ErrorKind::AllMerchantsHired,
                MerchantError::ArithmeticOverflow { .. } => ErrorKind::Internal,
            },
            Self::Store(_) => ErrorKind::PersistenceFailure,
            Self::Market(_) | Self::World(_) => ErrorKind::Internal,
        }
    }
}
