//! Per-asset auction registry.
//!
//! Each asset owns one slot guarded by its own mutex, so operations on
//! different assets never contend. The outer map lock is held only long
//! enough to fetch or create a slot.
//!
//! Slot guards must never be held across calls into external ports.

use super::entities::AuctionRecord;
use parking_lot::{Mutex, RwLock};
use shared_types::AssetId;
use std::collections::HashMap;
use std::sync::Arc;

/// One asset's auction state. `None` means no auction.
pub type AuctionSlot = Arc<Mutex<Option<AuctionRecord>>>;

/// Map from asset to its auction slot.
#[derive(Debug, Default)]
pub struct AuctionRegistry {
    slots: RwLock<HashMap<AssetId, AuctionSlot>>,
}

impl AuctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the slot for `asset_id`, creating a vacant one if needed.
    pub fn slot(&self, asset_id: AssetId) -> AuctionSlot {
        if let Some(slot) = self.slots.read().get(&asset_id) {
            return Arc::clone(slot);
        }
        let mut slots = self.slots.write();
        Arc::clone(slots.entry(asset_id).or_default())
    }

    /// Get the slot for `asset_id` without creating one.
    pub fn existing_slot(&self, asset_id: AssetId) -> Option<AuctionSlot> {
        self.slots.read().get(&asset_id).map(Arc::clone)
    }

    /// Snapshot of the record for `asset_id`.
    pub fn get_auction(&self, asset_id: AssetId) -> Option<AuctionRecord> {
        self.existing_slot(asset_id)
            .and_then(|slot| slot.lock().clone())
    }

    /// Delete the record for `asset_id`, returning it.
    pub fn remove_auction(&self, asset_id: AssetId) -> Option<AuctionRecord> {
        let slot = self.existing_slot(asset_id)?;
        let removed = slot.lock().take();
        drop(slot);
        self.prune(asset_id);
        removed
    }

    /// Apply `f` to the record for `asset_id` under its slot lock.
    ///
    /// Returns `None` when no record exists.
    pub fn update<R>(
        &self,
        asset_id: AssetId,
        f: impl FnOnce(&mut AuctionRecord) -> R,
    ) -> Option<R> {
        let slot = self.existing_slot(asset_id)?;
        let mut guard = slot.lock();
        guard.as_mut().map(f)
    }

    /// Drop the slot for `asset_id` if it is vacant and nobody else holds it.
    pub fn prune(&self, asset_id: AssetId) {
        let mut slots = self.slots.write();
        let removable = match slots.get(&asset_id) {
            // Only the map holds a reference, so no one can be about to lock it.
            Some(slot) if Arc::strong_count(slot) == 1 => {
                slot.try_lock().map(|g| g.is_none()).unwrap_or(false)
            }
            _ => false,
        };
        if removable {
            slots.remove(&asset_id);
        }
    }

    /// Number of assets with an auction record.
    pub fn active_count(&self) -> usize {
        self.slots
            .read()
            .values()
            .filter(|slot| slot.lock().is_some())
            .count()
    }

    /// Number of slots in the map, vacant ones included.
    pub fn slot_count(&self) -> usize {
        self.slots.read().len()
    }
}
