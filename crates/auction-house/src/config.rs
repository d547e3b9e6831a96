//! Auction configuration.
//!
//! All limits have sane defaults with environment override capability.

use crate::domain::DEFAULT_AUCTION_DURATION_MS;
use shared_types::Amount;
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Auctions would expire the instant they open.
    #[error("Auction duration must be greater than zero")]
    ZeroDuration,
}

/// Auction configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuctionConfig {
    /// Time between opening and expiry, in milliseconds
    pub auction_duration_ms: u64,
    /// Whether an owner may close an expired auction that received no bids
    pub allow_unsold_reclaim: bool,
    /// Smallest reserve price accepted by `start_auction`. Zero accepts any
    /// reserve; a zero bid still never leads because bids must beat zero.
    pub min_reserve_price: Amount,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            auction_duration_ms: DEFAULT_AUCTION_DURATION_MS,
            allow_unsold_reclaim: true,
            min_reserve_price: 0,
        }
    }
}

impl AuctionConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AUCTION_DURATION_SECS`: Auction length in seconds (default: 86400)
    /// - `AUCTION_ALLOW_UNSOLD_RECLAIM`: Owner reclaim of bidless auctions (default: true)
    /// - `AUCTION_MIN_RESERVE`: Minimum reserve price in base units (default: 0)
    ///
    /// Unparsable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            auction_duration_ms: lookup("AUCTION_DURATION_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs.saturating_mul(1000))
                .unwrap_or(defaults.auction_duration_ms),

            allow_unsold_reclaim: lookup("AUCTION_ALLOW_UNSOLD_RECLAIM")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.allow_unsold_reclaim),

            min_reserve_price: lookup("AUCTION_MIN_RESERVE")
                .and_then(|v| v.parse::<Amount>().ok())
                .unwrap_or(defaults.min_reserve_price),
        }
    }

    /// Override the auction duration.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.auction_duration_ms = duration_ms;
        self
    }

    /// Strict mode: bidless auctions can never be closed.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.allow_unsold_reclaim = false;
        self
    }

    /// Validate configuration before building a service.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auction_duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}
