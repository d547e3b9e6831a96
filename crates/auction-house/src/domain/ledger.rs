//! Escrow ledger.
//!
//! Holds the leading bidder's funds for each active auction, plus a book of
//! refunds that could not be delivered when their owner was outbid.
//!
//! INVARIANT: at most one entry per asset, and it always belongs to the
//! auction's current leader with exactly the current bid.
//!
//! Every release removes its entry before crediting and restores it if the
//! credit fails, so a failed payout leaves the ledger unchanged.

use super::entities::EscrowEntry;
use crate::error::{AuctionError, AuctionResult};
use crate::ports::outbound::ValueTransfer;
use parking_lot::Mutex;
use shared_types::{AccountId, Amount, AssetId};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct EscrowLedger {
    entries: Mutex<HashMap<AssetId, EscrowEntry>>,
    held: Mutex<HashMap<AccountId, Amount>>,
}

impl EscrowLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record funds held for a new leader.
    pub fn deposit(&self, entry: EscrowEntry) -> AuctionResult<()> {
        let mut entries = self.entries.lock();
        if entries.contains_key(&entry.asset_id) {
            return Err(AuctionError::EscrowOccupied {
                asset_id: entry.asset_id,
            });
        }
        entries.insert(entry.asset_id, entry);
        Ok(())
    }

    /// Remove and return the entry for `asset_id` if it belongs to `bidder`.
    pub fn take(&self, asset_id: AssetId, bidder: &AccountId) -> AuctionResult<EscrowEntry> {
        let mut entries = self.entries.lock();
        match entries.get(&asset_id) {
            Some(entry) if entry.bidder == *bidder => {
                entries.remove(&asset_id).ok_or(AuctionError::NothingHeld {
                    asset_id: Some(asset_id),
                    bidder: *bidder,
                })
            }
            _ => Err(AuctionError::NothingHeld {
                asset_id: Some(asset_id),
                bidder: *bidder,
            }),
        }
    }

    /// Put back an entry removed by `take`.
    pub fn restore(&self, entry: EscrowEntry) {
        self.entries.lock().insert(entry.asset_id, entry);
    }

    /// Credit a displaced leader's escrow back to them.
    ///
    /// The entry must already be out of the ledger. If the credit fails, the
    /// amount moves to the held-refund book and `false` is returned.
    pub fn pay_refund<V>(&self, entry: &EscrowEntry, channel: &V) -> bool
    where
        V: ValueTransfer + ?Sized,
    {
        match channel.credit(&entry.bidder, entry.amount) {
            Ok(()) => {
                debug!(
                    asset_id = %entry.asset_id,
                    bidder = %entry.bidder,
                    amount = entry.amount,
                    "Refund delivered"
                );
                true
            }
            Err(e) => {
                warn!(
                    asset_id = %entry.asset_id,
                    bidder = %entry.bidder,
                    amount = entry.amount,
                    error = %e,
                    "Refund failed, holding for withdrawal"
                );
                self.hold(entry.bidder, entry.amount);
                false
            }
        }
    }

    /// Return the escrow for `asset_id` to `bidder`.
    pub fn release_to_bidder<V>(
        &self,
        asset_id: AssetId,
        bidder: &AccountId,
        channel: &V,
    ) -> AuctionResult<Amount>
    where
        V: ValueTransfer + ?Sized,
    {
        let entry = self.take(asset_id, bidder)?;
        self.credit_or_restore(entry, bidder, channel)
    }

    /// Pay the escrow for `asset_id`, held for `winner`, to `owner`.
    pub fn release_to_owner<V>(
        &self,
        asset_id: AssetId,
        winner: &AccountId,
        owner: &AccountId,
        channel: &V,
    ) -> AuctionResult<Amount>
    where
        V: ValueTransfer + ?Sized,
    {
        let entry = self.take(asset_id, winner)?;
        self.credit_or_restore(entry, owner, channel)
    }

    fn credit_or_restore<V>(
        &self,
        entry: EscrowEntry,
        recipient: &AccountId,
        channel: &V,
    ) -> AuctionResult<Amount>
    where
        V: ValueTransfer + ?Sized,
    {
        match channel.credit(recipient, entry.amount) {
            Ok(()) => Ok(entry.amount),
            Err(e) => {
                self.restore(entry);
                Err(AuctionError::TransferFailed {
                    recipient: *recipient,
                    amount: entry.amount,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn hold(&self, account: AccountId, amount: Amount) {
        let mut held = self.held.lock();
        let balance = held.entry(account).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Refunds parked for `account`.
    pub fn held_refund(&self, account: &AccountId) -> Amount {
        self.held.lock().get(account).copied().unwrap_or(0)
    }

    /// Pay out everything parked for `account`.
    pub fn withdraw_held<V>(&self, account: &AccountId, channel: &V) -> AuctionResult<Amount>
    where
        V: ValueTransfer + ?Sized,
    {
        let amount = self
            .held
            .lock()
            .remove(account)
            .ok_or(AuctionError::NothingHeld {
                asset_id: None,
                bidder: *account,
            })?;

        if let Err(e) = channel.credit(account, amount) {
            self.hold(*account, amount);
            return Err(AuctionError::TransferFailed {
                recipient: *account,
                amount,
                reason: e.to_string(),
            });
        }
        Ok(amount)
    }

    /// Amount escrowed for the leader of `asset_id`.
    pub fn escrowed_amount(&self, asset_id: AssetId) -> Amount {
        self.entries
            .lock()
            .get(&asset_id)
            .map(|e| e.amount)
            .unwrap_or(0)
    }

    /// Escrow entry for `asset_id`.
    pub fn entry(&self, asset_id: AssetId) -> Option<EscrowEntry> {
        self.entries.lock().get(&asset_id).copied()
    }

    /// Sum of all leader escrow.
    pub fn total_escrowed(&self) -> Amount {
        self.entries
            .lock()
            .values()
            .fold(0, |acc: Amount, e| acc.saturating_add(e.amount))
    }

    /// Sum of all parked refunds.
    pub fn total_held(&self) -> Amount {
        self.held
            .lock()
            .values()
            .fold(0, |acc: Amount, v| acc.saturating_add(*v))
    }
}
