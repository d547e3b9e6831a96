//! Core domain entities for the auction subsystem.
//!
//! `AuctionRecord` is the per-asset state machine:
//!
//! ```text
//! [NoAuction] ──start──→ [Active] ──bid (strictly higher)──→ [Active]
//!                           │
//!                           └── now >= end_time ──→ [Finalizable]
//!                                                       │
//!                     finalize by leader ──→ [Settling] ──→ [Settled] (record deleted)
//!                                               │
//!                                               ├── external call failed, undone ──→ [Finalizable]
//!                                               │
//!                                               └── undo failed ──→ [Quarantined]
//! ```
//!
//! A quarantined record is frozen: no bid, finalize or reclaim can touch it.

use crate::error::{AuctionError, AuctionResult};
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Amount, AssetId, Timestamp};
use uuid::Uuid;

/// Default auction length: 24 hours.
pub const DEFAULT_AUCTION_DURATION_MS: u64 = 24 * 60 * 60 * 1000;

/// Lifecycle status of a stored auction record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuctionStatus {
    /// Accepting bids until `end_time`, finalizable afterwards.
    #[default]
    Active,
    /// A finalize has validated and is performing its external transfers.
    Settling,
    /// A failed settlement could not be undone. Asset and escrow are out of
    /// step and the record accepts no further operations.
    Quarantined,
}

/// A leading bid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub bidder: AccountId,
    pub amount: Amount,
}

/// An auction over a single asset.
///
/// INVARIANT: `current_bid() == 0` if and only if there is no leader.
/// Enforced structurally: amount and bidder live together in `leader`.
///
/// INVARIANT: the leading amount never decreases and `end_time` never changes.
///
/// Serialize-only: records are built through `open` and `record_bid`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuctionRecord {
    /// Asset being auctioned.
    pub asset_id: AssetId,
    /// Unique id of this auction instance.
    pub auction_id: Uuid,
    /// Owner who opened the auction.
    pub seller: AccountId,
    /// Opening time (ms).
    pub started_at: Timestamp,
    /// Absolute expiry (ms). Bids are accepted while `now < end_time`.
    pub end_time: Timestamp,
    /// Minimum acceptable bid.
    pub reserve_price: Amount,
    /// Lifecycle status.
    pub status: AuctionStatus,
    leader: Option<Bid>,
}

impl AuctionRecord {
    /// Open a new auction with no bids.
    pub fn open(
        asset_id: AssetId,
        seller: AccountId,
        reserve_price: Amount,
        now: Timestamp,
        duration_ms: u64,
    ) -> Self {
        Self {
            asset_id,
            auction_id: Uuid::new_v4(),
            seller,
            started_at: now,
            end_time: now.saturating_add(duration_ms),
            reserve_price,
            status: AuctionStatus::Active,
            leader: None,
        }
    }

    /// Current leading amount, zero without bids.
    pub fn current_bid(&self) -> Amount {
        self.leader.map(|bid| bid.amount).unwrap_or(0)
    }

    /// Current leading bidder.
    pub fn current_bidder(&self) -> Option<AccountId> {
        self.leader.map(|bid| bid.bidder)
    }

    /// Current leading bid.
    pub fn leader(&self) -> Option<Bid> {
        self.leader
    }

    pub fn has_bids(&self) -> bool {
        self.leader.is_some()
    }

    /// Expiry is inclusive: at `now == end_time` the auction is over.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.end_time
    }

    pub fn is_settling(&self) -> bool {
        self.status == AuctionStatus::Settling
    }

    pub fn is_quarantined(&self) -> bool {
        self.status == AuctionStatus::Quarantined
    }

    /// Check a bid against this record without changing it.
    ///
    /// Order: expiry, reserve, strict increase, exact funding.
    pub fn validate_bid(
        &self,
        amount: Amount,
        funds_provided: Amount,
        now: Timestamp,
    ) -> AuctionResult<()> {
        if self.status != AuctionStatus::Active || self.is_expired(now) {
            return Err(AuctionError::AuctionEnded {
                asset_id: self.asset_id,
                end_time: Some(self.end_time),
            });
        }
        if amount < self.reserve_price {
            return Err(AuctionError::BidTooLow {
                amount,
                reserve_price: self.reserve_price,
            });
        }
        let current_bid = self.current_bid();
        if amount <= current_bid {
            return Err(AuctionError::BidNotHighEnough {
                amount,
                current_bid,
            });
        }
        if funds_provided != amount {
            return Err(AuctionError::FundsMismatch {
                amount,
                provided: funds_provided,
            });
        }
        Ok(())
    }

    /// Make `bidder` the leader. Returns the displaced leader, if any.
    ///
    /// Callers must have passed `validate_bid` first.
    pub fn record_bid(&mut self, bidder: AccountId, amount: Amount) -> Option<Bid> {
        debug_assert!(amount > self.current_bid());
        self.leader.replace(Bid { bidder, amount })
    }

    /// Check that `caller` may settle this auction at `now`.
    ///
    /// Returns the winning bid.
    pub fn validate_finalize(&self, caller: &AccountId, now: Timestamp) -> AuctionResult<Bid> {
        self.ensure_not_settling()?;
        if !self.is_expired(now) {
            return Err(AuctionError::AuctionNotEnded {
                asset_id: self.asset_id,
                end_time: self.end_time,
                now,
            });
        }
        match self.leader {
            Some(bid) if bid.bidder == *caller => Ok(bid),
            _ => Err(AuctionError::NotHighestBidder {
                asset_id: self.asset_id,
                caller: *caller,
            }),
        }
    }

    /// Check that this auction may be closed without a sale at `now`.
    ///
    /// Ownership of the caller is checked by the service.
    pub fn validate_reclaim(&self, now: Timestamp) -> AuctionResult<()> {
        self.ensure_not_settling()?;
        if !self.is_expired(now) {
            return Err(AuctionError::AuctionNotEnded {
                asset_id: self.asset_id,
                end_time: self.end_time,
                now,
            });
        }
        if self.has_bids() {
            return Err(AuctionError::AuctionHasBids {
                asset_id: self.asset_id,
                current_bid: self.current_bid(),
            });
        }
        Ok(())
    }

    fn ensure_not_settling(&self) -> AuctionResult<()> {
        match self.status {
            AuctionStatus::Active => Ok(()),
            AuctionStatus::Settling => Err(AuctionError::SettlementInProgress {
                asset_id: self.asset_id,
            }),
            AuctionStatus::Quarantined => Err(AuctionError::SettlementQuarantined {
                asset_id: self.asset_id,
            }),
        }
    }

    pub fn begin_settlement(&mut self) {
        self.status = AuctionStatus::Settling;
    }

    pub fn abort_settlement(&mut self) {
        self.status = AuctionStatus::Active;
    }

    /// Freeze a settlement whose rollback failed.
    pub fn quarantine(&mut self) {
        self.status = AuctionStatus::Quarantined;
    }
}

/// Funds held on behalf of the current leader of one auction.
///
/// Exists only while its bidder leads; released exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowEntry {
    pub asset_id: AssetId,
    pub auction_id: Uuid,
    pub bidder: AccountId,
    pub amount: Amount,
}

/// What happened to a displaced leader's escrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefundOutcome {
    /// Credited back immediately.
    Paid { bidder: AccountId, amount: Amount },
    /// Credit failed; parked in the held-refund book for withdrawal.
    Held { bidder: AccountId, amount: Amount },
}

impl RefundOutcome {
    pub fn bidder(&self) -> AccountId {
        match self {
            Self::Paid { bidder, .. } | Self::Held { bidder, .. } => *bidder,
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            Self::Paid { amount, .. } | Self::Held { amount, .. } => *amount,
        }
    }

    pub fn is_held(&self) -> bool {
        matches!(self, Self::Held { .. })
    }
}

/// Result of an accepted bid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidReceipt {
    /// Record state after the bid.
    pub auction: AuctionRecord,
    /// Refund of the displaced leader, if there was one.
    pub refund: Option<RefundOutcome>,
}

/// Result of a successful finalize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub asset_id: AssetId,
    pub auction_id: Uuid,
    pub winner: AccountId,
    /// Seller who opened the auction; gave up the asset and received the payout.
    pub former_owner: AccountId,
    pub final_bid: Amount,
}
