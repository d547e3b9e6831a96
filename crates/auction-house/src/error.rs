//! Error types for the auction subsystem
//!
//! Every rejected operation leaves registry and ledger state exactly as it
//! was before the call. None of these errors are retried internally.

use shared_types::{AccountId, Amount, AssetId, Timestamp};
use thiserror::Error;

/// Auction subsystem errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    /// Asset does not exist in the asset registry
    #[error("Invalid asset: {asset_id} does not exist")]
    InvalidAsset { asset_id: AssetId },

    /// Caller does not own the asset
    #[error("Caller {caller} is not the owner of {asset_id}")]
    NotOwner { asset_id: AssetId, caller: AccountId },

    /// An auction record already exists for the asset
    #[error("Auction already active for {asset_id}")]
    AuctionAlreadyActive { asset_id: AssetId },

    /// No auction record exists for the asset
    #[error("No active auction for {asset_id}")]
    NoActiveAuction { asset_id: AssetId },

    /// Bid arrived after expiry, or for an asset without an auction
    #[error("Auction ended for {asset_id} (end time {end_time:?})")]
    AuctionEnded {
        asset_id: AssetId,
        end_time: Option<Timestamp>,
    },

    /// Settlement attempted before expiry
    #[error("Auction for {asset_id} not ended: ends at {end_time}, now {now}")]
    AuctionNotEnded {
        asset_id: AssetId,
        end_time: Timestamp,
        now: Timestamp,
    },

    /// Bid below the reserve price
    #[error("Bid {amount} below reserve price {reserve_price}")]
    BidTooLow { amount: Amount, reserve_price: Amount },

    /// Bid does not strictly exceed the current leading bid
    #[error("Bid {amount} not higher than current bid {current_bid}")]
    BidNotHighEnough { amount: Amount, current_bid: Amount },

    /// Escrowed funds differ from the bid amount
    #[error("Funds mismatch: bid {amount}, provided {provided}")]
    FundsMismatch { amount: Amount, provided: Amount },

    /// Settlement attempted by someone other than the leader
    #[error("Caller {caller} is not the highest bidder for {asset_id}")]
    NotHighestBidder { asset_id: AssetId, caller: AccountId },

    /// Value channel refused a credit
    #[error("Transfer of {amount} to {recipient} failed: {reason}")]
    TransferFailed {
        recipient: AccountId,
        amount: Amount,
        reason: String,
    },

    /// Nothing held in escrow for the requested release
    #[error("Nothing held for {bidder} on {asset_id:?}")]
    NothingHeld {
        asset_id: Option<AssetId>,
        bidder: AccountId,
    },

    /// A leader entry already exists (ledger invariant breach)
    #[error("Escrow already occupied for {asset_id}")]
    EscrowOccupied { asset_id: AssetId },

    /// A finalize for this asset is performing its external calls
    #[error("Settlement already in progress for {asset_id}")]
    SettlementInProgress { asset_id: AssetId },

    /// A settlement failed and its rollback failed too; the record is frozen
    #[error("Settlement for {asset_id} is quarantined after a failed rollback")]
    SettlementQuarantined { asset_id: AssetId },

    /// Asset registry refused the ownership transfer
    #[error("Asset transfer failed for {asset_id}: {reason}")]
    AssetTransferFailed { asset_id: AssetId, reason: String },

    /// Reclaim attempted on an auction that received bids
    #[error("Auction for {asset_id} has bids (current bid {current_bid})")]
    AuctionHasBids {
        asset_id: AssetId,
        current_bid: Amount,
    },

    /// Owner reclaim is switched off by configuration
    #[error("Reclaiming unsold auctions is disabled")]
    ReclaimDisabled,

    /// Reserve price below the configured floor
    #[error("Reserve price {reserve_price} below minimum {minimum}")]
    ReserveTooLow { reserve_price: Amount, minimum: Amount },
}

impl AuctionError {
    /// Stable snake_case label for metrics and log fields.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::InvalidAsset { .. } => "invalid_asset",
            Self::NotOwner { .. } => "not_owner",
            Self::AuctionAlreadyActive { .. } => "auction_already_active",
            Self::NoActiveAuction { .. } => "no_active_auction",
            Self::AuctionEnded { .. } => "auction_ended",
            Self::AuctionNotEnded { .. } => "auction_not_ended",
            Self::BidTooLow { .. } => "bid_too_low",
            Self::BidNotHighEnough { .. } => "bid_not_high_enough",
            Self::FundsMismatch { .. } => "funds_mismatch",
            Self::NotHighestBidder { .. } => "not_highest_bidder",
            Self::TransferFailed { .. } => "transfer_failed",
            Self::NothingHeld { .. } => "nothing_held",
            Self::EscrowOccupied { .. } => "escrow_occupied",
            Self::SettlementInProgress { .. } => "settlement_in_progress",
            Self::SettlementQuarantined { .. } => "settlement_quarantined",
            Self::AssetTransferFailed { .. } => "asset_transfer_failed",
            Self::AuctionHasBids { .. } => "auction_has_bids",
            Self::ReclaimDisabled => "reclaim_disabled",
            Self::ReserveTooLow { .. } => "reserve_too_low",
        }
    }
}

/// Result type for auction operations
pub type AuctionResult<T> = Result<T, AuctionError>;
