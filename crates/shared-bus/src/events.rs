//! # Auction Events
//!
//! Defines all notifications that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::entities::{AccountId, Amount, AssetId, Timestamp};
use uuid::Uuid;

/// All events that can be published to the event bus.
///
/// Events describe state transitions that have already been committed.
/// Consumers must not assume they are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionEvent {
    // =========================================================================
    // ASSET REGISTRY
    // =========================================================================
    /// A new asset was minted to its first owner.
    AssetMinted {
        asset_id: AssetId,
        owner: AccountId,
    },

    // =========================================================================
    // BIDDING
    // =========================================================================
    /// An owner opened a timed auction.
    AuctionStarted {
        asset_id: AssetId,
        /// Unique id of this auction instance.
        auction_id: Uuid,
        /// Absolute expiry (ms since epoch).
        end_time: Timestamp,
        /// Reserve price.
        start_price: Amount,
    },

    /// A bid was accepted and is now the leading bid.
    BidPlaced {
        asset_id: AssetId,
        amount: Amount,
        bidder: AccountId,
    },

    // =========================================================================
    // ESCROW
    // =========================================================================
    /// An outbid refund could not be delivered and is held for withdrawal.
    RefundHeld {
        asset_id: AssetId,
        bidder: AccountId,
        amount: Amount,
    },

    /// A held refund was withdrawn by its owner.
    RefundWithdrawn { account: AccountId, amount: Amount },

    // =========================================================================
    // SETTLEMENT
    // =========================================================================
    /// The auction settled: asset delivered to the winner, seller paid.
    AuctionEnded {
        asset_id: AssetId,
        auction_id: Uuid,
        winner: AccountId,
        final_bid: Amount,
    },

    /// An expired auction with no bids was closed by its owner.
    AuctionReclaimed { asset_id: AssetId, owner: AccountId },
}

impl AuctionEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::AssetMinted { .. } => EventTopic::Assets,
            Self::AuctionStarted { .. } | Self::BidPlaced { .. } => EventTopic::Bidding,
            Self::RefundHeld { .. } | Self::RefundWithdrawn { .. } => EventTopic::Escrow,
            Self::AuctionEnded { .. } | Self::AuctionReclaimed { .. } => EventTopic::Settlement,
        }
    }

    /// The asset this event concerns, if any.
    #[must_use]
    pub fn asset_id(&self) -> Option<AssetId> {
        match self {
            Self::AssetMinted { asset_id, .. }
            | Self::AuctionStarted { asset_id, .. }
            | Self::BidPlaced { asset_id, .. }
            | Self::RefundHeld { asset_id, .. }
            | Self::AuctionEnded { asset_id, .. }
            | Self::AuctionReclaimed { asset_id, .. } => Some(*asset_id),
            Self::RefundWithdrawn { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Minting and asset registry notifications.
    Assets,
    /// Auction opening and accepted bids.
    Bidding,
    /// Refund bookkeeping.
    Escrow,
    /// Settlement and reclaim.
    Settlement,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Assets to include. Empty means all assets.
    pub assets: Vec<AssetId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            assets: Vec::new(),
        }
    }

    /// Create a filter for events about specific assets.
    ///
    /// Events without an asset (withdrawals) never match an asset filter.
    #[must_use]
    pub fn for_assets(assets: Vec<AssetId>) -> Self {
        Self {
            topics: Vec::new(),
            assets,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &AuctionEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let asset_match = self.assets.is_empty()
            || event
                .asset_id()
                .is_some_and(|asset| self.assets.contains(&asset));

        topic_match && asset_match
    }
}
