//! In-memory asset registry.
//!
//! Mints assets with sequential ids and tracks exclusive ownership.

use crate::ports::outbound::{AssetError, AssetRegistry, AuctionEventSink};
use parking_lot::RwLock;
use shared_bus::AuctionEvent;
use shared_types::{AccountId, AssetId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Default)]
pub struct InMemoryAssetRegistry {
    owners: RwLock<HashMap<AssetId, AccountId>>,
    next_id: AtomicU64,
    sink: Option<Arc<dyn AuctionEventSink>>,
    fail_next_transfer: AtomicBool,
}

impl InMemoryAssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that announces every mint on `sink`.
    pub fn with_sink(sink: Arc<dyn AuctionEventSink>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::default()
        }
    }

    /// Create a new asset owned by `owner`. Ids start at 1.
    pub fn mint(&self, owner: AccountId) -> AssetId {
        let asset_id = AssetId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.owners.write().insert(asset_id, owner);
        debug!(asset_id = %asset_id, owner = %owner, "Asset minted");

        if let Some(sink) = &self.sink {
            sink.emit(AuctionEvent::AssetMinted { asset_id, owner });
        }
        asset_id
    }

    /// Make the next `transfer` fail with `Unavailable`.
    pub fn fail_next_transfer(&self) {
        self.fail_next_transfer.store(true, Ordering::SeqCst);
    }

    /// Number of minted assets.
    pub fn asset_count(&self) -> usize {
        self.owners.read().len()
    }
}

impl AssetRegistry for InMemoryAssetRegistry {
    fn asset_exists(&self, asset_id: AssetId) -> bool {
        self.owners.read().contains_key(&asset_id)
    }

    fn owner_of(&self, asset_id: AssetId) -> Result<AccountId, AssetError> {
        self.owners
            .read()
            .get(&asset_id)
            .copied()
            .ok_or(AssetError::NotFound(asset_id))
    }

    fn transfer(
        &self,
        asset_id: AssetId,
        from: &AccountId,
        to: &AccountId,
    ) -> Result<(), AssetError> {
        if self.fail_next_transfer.swap(false, Ordering::SeqCst) {
            return Err(AssetError::Unavailable("injected failure".into()));
        }

        let mut owners = self.owners.write();
        let owner = owners
            .get_mut(&asset_id)
            .ok_or(AssetError::NotFound(asset_id))?;
        if owner != from {
            return Err(AssetError::NotOwnedBy {
                asset_id,
                from: *from,
            });
        }
        *owner = *to;
        Ok(())
    }
}
