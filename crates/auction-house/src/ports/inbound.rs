//! Driving Ports (API - Inbound)
//!
//! Every mutating call is atomic per asset: it either applies fully or
//! returns an error with registry and ledger untouched.

use crate::domain::{AuctionRecord, BidReceipt, Settlement};
use crate::error::AuctionResult;
use shared_types::{AccountId, Amount, AssetId};

/// Primary auction API
pub trait AuctionApi: Send + Sync {
    /// Open a timed auction on an owned asset.
    ///
    /// # Errors
    /// - `InvalidAsset`: asset was never minted
    /// - `NotOwner`: `initiator` does not own the asset
    /// - `AuctionAlreadyActive`: a record already exists
    /// - `ReserveTooLow`: reserve below a non-zero configured floor
    fn start_auction(
        &self,
        asset_id: AssetId,
        reserve_price: Amount,
        initiator: AccountId,
    ) -> AuctionResult<AuctionRecord>;

    /// Submit an escrowed bid.
    ///
    /// `funds_provided` is what the bidder actually transferred in and must
    /// equal `amount`. The displaced leader, if any, is refunded; a failed
    /// refund is held for withdrawal and does not reject the bid.
    ///
    /// # Errors
    /// `AuctionEnded`, `BidTooLow`, `BidNotHighEnough`, `FundsMismatch`,
    /// checked in that order.
    fn place_bid(
        &self,
        asset_id: AssetId,
        amount: Amount,
        bidder: AccountId,
        funds_provided: Amount,
    ) -> AuctionResult<BidReceipt>;

    /// Settle an expired auction in favour of its leader.
    ///
    /// Transfers the asset from the seller to `caller` and pays the seller.
    /// If either step fails, both are undone and the auction stays
    /// finalizable. If the undo fails, the record is quarantined.
    ///
    /// # Errors
    /// `NoActiveAuction`, `SettlementInProgress` or `SettlementQuarantined`,
    /// `AuctionNotEnded`, `NotHighestBidder`, `AssetTransferFailed`,
    /// `TransferFailed`.
    fn finalize_auction(&self, asset_id: AssetId, caller: AccountId) -> AuctionResult<Settlement>;

    /// Close an expired auction that received no bids.
    ///
    /// # Errors
    /// `ReclaimDisabled`, `NoActiveAuction`, `SettlementInProgress` or
    /// `SettlementQuarantined`, `AuctionNotEnded`, `AuctionHasBids`, `NotOwner`.
    fn reclaim_unsold(&self, asset_id: AssetId, caller: AccountId) -> AuctionResult<AuctionRecord>;

    /// Pay out refunds that were held because their credit failed.
    fn withdraw_refund(&self, account: AccountId) -> AuctionResult<Amount>;

    /// Look up the auction for an asset.
    ///
    /// # Errors
    /// `NoActiveAuction` when no record exists.
    fn get_auction(&self, asset_id: AssetId) -> AuctionResult<AuctionRecord>;

    /// Funds escrowed for the asset's current leader.
    fn escrowed_amount(&self, asset_id: AssetId) -> Amount;

    /// Refunds held for `account`.
    fn held_refund(&self, account: &AccountId) -> Amount;

    /// Number of assets with an auction record.
    fn active_auction_count(&self) -> usize;
}
