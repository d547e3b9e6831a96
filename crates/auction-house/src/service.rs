//! Auction Service - Bidding and Settlement engines
//!
//! ## Ordering contract
//!
//! Registry and ledger state is always brought to its final shape under the
//! asset's slot lock, and the lock is released before any outbound port is
//! called. A recipient that re-enters the service from inside `credit`
//! therefore sees a consistent state and can never release the same escrow
//! twice.
//!
//! Finalize needs two external effects (asset transfer and payout) to be all
//! or nothing. It marks the record `Settling` under the lock, performs both
//! effects unlocked, and either deletes the record or undoes what it did and
//! returns the record to `Active`. If the undo itself fails the record is
//! quarantined instead, so no later call can settle it against a stale owner.
//!
//! The payout always goes to the seller recorded at start.

use crate::config::{AuctionConfig, ConfigError};
use crate::domain::{
    AuctionRecord, AuctionRegistry, BidReceipt, EscrowEntry, EscrowLedger, RefundOutcome,
    Settlement,
};
use crate::error::{AuctionError, AuctionResult};
use crate::metrics;
use crate::ports::inbound::AuctionApi;
use crate::ports::outbound::{AssetRegistry, AuctionEventSink, TimeSource, ValueTransfer};
use auction_telemetry::{asset_span, log_auction_event};
use shared_bus::AuctionEvent;
use shared_types::{AccountId, Amount, AssetId};
use std::sync::Arc;
use tracing::{error, warn};

/// Auction service implementation
pub struct AuctionService<A, V, E, T>
where
    A: AssetRegistry + ?Sized,
    V: ValueTransfer + ?Sized,
    E: AuctionEventSink + ?Sized,
    T: TimeSource + ?Sized,
{
    config: AuctionConfig,
    registry: AuctionRegistry,
    ledger: EscrowLedger,
    assets: Arc<A>,
    channel: Arc<V>,
    events: Arc<E>,
    clock: Arc<T>,
}

impl<A, V, E, T> AuctionService<A, V, E, T>
where
    A: AssetRegistry + ?Sized,
    V: ValueTransfer + ?Sized,
    E: AuctionEventSink + ?Sized,
    T: TimeSource + ?Sized,
{
    /// Create a new auction service.
    pub fn new(
        config: AuctionConfig,
        assets: Arc<A>,
        channel: Arc<V>,
        events: Arc<E>,
        clock: Arc<T>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            registry: AuctionRegistry::new(),
            ledger: EscrowLedger::new(),
            assets,
            channel,
            events,
            clock,
        })
    }

    pub fn config(&self) -> &AuctionConfig {
        &self.config
    }

    /// Sum of escrow held for all current leaders.
    pub fn total_escrowed(&self) -> Amount {
        self.ledger.total_escrowed()
    }

    /// Sum of all refunds waiting for withdrawal.
    pub fn total_held_refunds(&self) -> Amount {
        self.ledger.total_held()
    }

    fn reject_bid(&self, asset_id: AssetId, bidder: &AccountId, err: AuctionError) -> AuctionError {
        log_auction_event!(
            debug,
            asset_id,
            "bid",
            "Bid rejected",
            bidder = %bidder,
            reason = err.label()
        );
        metrics::record_bid_rejected(err.label());
        err
    }

    /// Return a `Settling` record to `Active` and report why.
    fn abort_settlement(&self, asset_id: AssetId, err: AuctionError) -> AuctionError {
        self.registry
            .update(asset_id, |record| record.abort_settlement());
        log_auction_event!(
            warn,
            asset_id,
            "finalize",
            "Settlement rolled back",
            reason = err.label(),
            error = %err
        );
        metrics::record_settlement_aborted(err.label());
        err
    }

    /// Freeze a `Settling` record whose rollback failed and report why.
    ///
    /// The record stays in the registry so the asset cannot be auctioned
    /// again until the mismatch is resolved out of band.
    fn quarantine_settlement(&self, asset_id: AssetId, err: AuctionError) -> AuctionError {
        self.registry.update(asset_id, |record| record.quarantine());
        log_auction_event!(
            error,
            asset_id,
            "finalize",
            "Settlement quarantined",
            reason = err.label(),
            error = %err
        );
        metrics::record_settlement_quarantined();
        err
    }

    /// Refund a displaced leader. The entry is already out of the ledger.
    fn refund_displaced(&self, entry: EscrowEntry) -> RefundOutcome {
        let delivered = self.ledger.pay_refund(&entry, &*self.channel);
        metrics::record_refund(!delivered);

        if delivered {
            RefundOutcome::Paid {
                bidder: entry.bidder,
                amount: entry.amount,
            }
        } else {
            self.events.emit(AuctionEvent::RefundHeld {
                asset_id: entry.asset_id,
                bidder: entry.bidder,
                amount: entry.amount,
            });
            RefundOutcome::Held {
                bidder: entry.bidder,
                amount: entry.amount,
            }
        }
    }
}

impl<A, V, E, T> AuctionApi for AuctionService<A, V, E, T>
where
    A: AssetRegistry + ?Sized,
    V: ValueTransfer + ?Sized,
    E: AuctionEventSink + ?Sized,
    T: TimeSource + ?Sized,
{
    fn start_auction(
        &self,
        asset_id: AssetId,
        reserve_price: Amount,
        initiator: AccountId,
    ) -> AuctionResult<AuctionRecord> {
        if !self.assets.asset_exists(asset_id) {
            return Err(AuctionError::InvalidAsset { asset_id });
        }
        let owner = self
            .assets
            .owner_of(asset_id)
            .map_err(|_| AuctionError::InvalidAsset { asset_id })?;
        if owner != initiator {
            return Err(AuctionError::NotOwner {
                asset_id,
                caller: initiator,
            });
        }

        let now = self.clock.now();
        let slot = self.registry.slot(asset_id);
        let result = {
            let mut guard = slot.lock();
            if guard.is_some() {
                Err(AuctionError::AuctionAlreadyActive { asset_id })
            } else if reserve_price < self.config.min_reserve_price {
                Err(AuctionError::ReserveTooLow {
                    reserve_price,
                    minimum: self.config.min_reserve_price,
                })
            } else {
                let record = AuctionRecord::open(
                    asset_id,
                    initiator,
                    reserve_price,
                    now,
                    self.config.auction_duration_ms,
                );
                *guard = Some(record.clone());
                Ok(record)
            }
        };
        drop(slot);

        let record = match result {
            Ok(record) => record,
            Err(err) => {
                self.registry.prune(asset_id);
                log_auction_event!(debug, asset_id, "start", "Start rejected", reason = err.label());
                return Err(err);
            }
        };

        log_auction_event!(
            info,
            asset_id,
            "start",
            "Auction started",
            auction_id = %record.auction_id,
            seller = %record.seller,
            reserve_price = record.reserve_price,
            end_time = record.end_time
        );
        metrics::record_auction_started();
        self.events.emit(AuctionEvent::AuctionStarted {
            asset_id,
            auction_id: record.auction_id,
            end_time: record.end_time,
            start_price: record.reserve_price,
        });

        Ok(record)
    }

    fn place_bid(
        &self,
        asset_id: AssetId,
        amount: Amount,
        bidder: AccountId,
        funds_provided: Amount,
    ) -> AuctionResult<BidReceipt> {
        let _span = asset_span!("place_bid", asset_id, bidder = %bidder).entered();
        let now = self.clock.now();
        let ended = AuctionError::AuctionEnded {
            asset_id,
            end_time: None,
        };
        let Some(slot) = self.registry.existing_slot(asset_id) else {
            return Err(self.reject_bid(asset_id, &bidder, ended));
        };

        // Effects: all bookkeeping completes before anyone is paid.
        let applied = {
            let mut guard = slot.lock();
            match guard.as_mut() {
                None => Err(ended),
                Some(record) => record
                    .validate_bid(amount, funds_provided, now)
                    .and_then(|()| {
                        let displaced = match record.leader() {
                            Some(prior) => Some(self.ledger.take(asset_id, &prior.bidder)?),
                            None => None,
                        };
                        let entry = EscrowEntry {
                            asset_id,
                            auction_id: record.auction_id,
                            bidder,
                            amount,
                        };
                        if let Err(err) = self.ledger.deposit(entry) {
                            if let Some(prior) = displaced {
                                self.ledger.restore(prior);
                            }
                            return Err(err);
                        }
                        record.record_bid(bidder, amount);
                        Ok((record.clone(), displaced))
                    }),
            }
        };
        drop(slot);

        let (auction, displaced) = match applied {
            Ok(applied) => applied,
            Err(err) => return Err(self.reject_bid(asset_id, &bidder, err)),
        };

        log_auction_event!(
            info,
            asset_id,
            "bid",
            "Bid accepted",
            bidder = %bidder,
            amount = amount
        );
        metrics::record_bid_accepted();
        self.events.emit(AuctionEvent::BidPlaced {
            asset_id,
            amount,
            bidder,
        });

        // Interactions: the displaced leader is paid last.
        let refund = displaced.map(|entry| self.refund_displaced(entry));

        Ok(BidReceipt { auction, refund })
    }

    fn finalize_auction(&self, asset_id: AssetId, caller: AccountId) -> AuctionResult<Settlement> {
        let _span = asset_span!("finalize_auction", asset_id, caller = %caller).entered();
        let now = self.clock.now();
        let no_auction = AuctionError::NoActiveAuction { asset_id };

        // Phase 1: validate and claim the record.
        let claimed = {
            let slot = self.registry.existing_slot(asset_id).ok_or(no_auction.clone())?;
            let mut guard = slot.lock();
            let record = guard.as_mut().ok_or(no_auction)?;
            let winning = record.validate_finalize(&caller, now);
            winning.map(|bid| {
                record.begin_settlement();
                (record.clone(), bid)
            })
        };
        let (record, winning) = match claimed {
            Ok(claimed) => claimed,
            Err(err) => {
                log_auction_event!(
                    debug,
                    asset_id,
                    "finalize",
                    "Finalize rejected",
                    caller = %caller,
                    reason = err.label()
                );
                return Err(err);
            }
        };

        // Phase 2: external effects, no lock held. The seller is the payee.
        let seller = record.seller;
        let owner = match self.assets.owner_of(asset_id) {
            Ok(owner) => owner,
            Err(e) => {
                return Err(self.abort_settlement(
                    asset_id,
                    AuctionError::AssetTransferFailed {
                        asset_id,
                        reason: e.to_string(),
                    },
                ))
            }
        };
        if owner != seller {
            warn!(
                asset_id = %asset_id,
                seller = %seller,
                owner = %owner,
                "Asset left the seller during auction, refusing to settle"
            );
            return Err(self.abort_settlement(
                asset_id,
                AuctionError::AssetTransferFailed {
                    asset_id,
                    reason: format!("asset no longer held by seller {seller}"),
                },
            ));
        }

        if let Err(e) = self.assets.transfer(asset_id, &seller, &caller) {
            return Err(self.abort_settlement(
                asset_id,
                AuctionError::AssetTransferFailed {
                    asset_id,
                    reason: e.to_string(),
                },
            ));
        }

        let final_bid = match self
            .ledger
            .release_to_owner(asset_id, &caller, &seller, &*self.channel)
        {
            Ok(paid) => paid,
            Err(err) => {
                // Escrow is already restored; put the asset back.
                if let Err(e) = self.assets.transfer(asset_id, &caller, &seller) {
                    error!(
                        asset_id = %asset_id,
                        winner = %caller,
                        seller = %seller,
                        error = %e,
                        "Failed to return asset after payout failure"
                    );
                    return Err(self.quarantine_settlement(asset_id, err));
                }
                return Err(self.abort_settlement(asset_id, err));
            }
        };
        debug_assert_eq!(final_bid, winning.amount);

        self.registry.remove_auction(asset_id);

        log_auction_event!(
            info,
            asset_id,
            "finalize",
            "Auction settled",
            auction_id = %record.auction_id,
            winner = %caller,
            former_owner = %seller,
            final_bid = final_bid
        );
        metrics::record_settled();
        self.events.emit(AuctionEvent::AuctionEnded {
            asset_id,
            auction_id: record.auction_id,
            winner: caller,
            final_bid,
        });

        Ok(Settlement {
            asset_id,
            auction_id: record.auction_id,
            winner: caller,
            former_owner: seller,
            final_bid,
        })
    }

    fn reclaim_unsold(&self, asset_id: AssetId, caller: AccountId) -> AuctionResult<AuctionRecord> {
        if !self.config.allow_unsold_reclaim {
            return Err(AuctionError::ReclaimDisabled);
        }
        let now = self.clock.now();
        let no_auction = AuctionError::NoActiveAuction { asset_id };

        let checked = self
            .registry
            .update(asset_id, |record| {
                record.validate_reclaim(now).map(|()| record.auction_id)
            })
            .ok_or(no_auction.clone())??;

        let owner = self
            .assets
            .owner_of(asset_id)
            .map_err(|_| AuctionError::InvalidAsset { asset_id })?;
        if owner != caller {
            return Err(AuctionError::NotOwner { asset_id, caller });
        }

        // Re-check under the lock: another call may have closed it meanwhile.
        let removed = {
            let slot = self.registry.existing_slot(asset_id).ok_or(no_auction.clone())?;
            let mut guard = slot.lock();
            let current = guard
                .as_ref()
                .filter(|record| record.auction_id == checked)
                .ok_or(no_auction.clone())?;
            current.validate_reclaim(now)?;
            guard.take().ok_or(no_auction)?
        };
        self.registry.prune(asset_id);

        log_auction_event!(
            info,
            asset_id,
            "reclaim",
            "Unsold auction reclaimed",
            auction_id = %removed.auction_id,
            owner = %caller
        );
        metrics::record_reclaimed();
        self.events.emit(AuctionEvent::AuctionReclaimed {
            asset_id,
            owner: caller,
        });

        Ok(removed)
    }

    fn withdraw_refund(&self, account: AccountId) -> AuctionResult<Amount> {
        let amount = self.ledger.withdraw_held(&account, &*self.channel)?;
        tracing::info!(account = %account, amount, op = "withdraw", "Held refund withdrawn");
        self.events
            .emit(AuctionEvent::RefundWithdrawn { account, amount });
        Ok(amount)
    }

    fn get_auction(&self, asset_id: AssetId) -> AuctionResult<AuctionRecord> {
        self.registry
            .get_auction(asset_id)
            .ok_or(AuctionError::NoActiveAuction { asset_id })
    }

    fn escrowed_amount(&self, asset_id: AssetId) -> Amount {
        self.ledger.escrowed_amount(asset_id)
    }

    fn held_refund(&self, account: &AccountId) -> Amount {
        self.ledger.held_refund(account)
    }

    fn active_auction_count(&self) -> usize {
        self.registry.active_count()
    }
}
