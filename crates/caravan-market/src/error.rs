//! Error types for the caravan-market crate.

/// Errors that can occur while computing prices or generating markets.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    /// A price computation overflowed or produced a value outside `u32`.
    #[error("price computation overflow: {context}")]
    PriceOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// The scheduler was configured with an unusable rotation period.
    #[error("invalid event period: {reason}")]
    InvalidPeriod {
        /// Explanation of what is wrong with the period.
        reason: String,
    },
}
