//! Driven Ports (SPI - Outbound)
//!
//! Collaborators the auction core calls but does not own. Implementations
//! must be callable from any thread and may call back into the service.

use shared_bus::AuctionEvent;
use shared_types::{AccountId, Amount, AssetId, Timestamp};
use thiserror::Error;

/// Asset registry failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("Asset {0} not found")]
    NotFound(AssetId),

    #[error("{from} does not own {asset_id}")]
    NotOwnedBy { asset_id: AssetId, from: AccountId },

    #[error("Asset registry unavailable: {0}")]
    Unavailable(String),
}

/// Asset registry interface
///
/// Owns minting and metadata. The core only reads ownership and moves
/// assets on settlement.
pub trait AssetRegistry: Send + Sync {
    /// Whether `asset_id` has been minted.
    fn asset_exists(&self, asset_id: AssetId) -> bool;

    /// Current owner of `asset_id`.
    fn owner_of(&self, asset_id: AssetId) -> Result<AccountId, AssetError>;

    /// Move `asset_id` from `from` to `to`. Fails if `from` is not the owner.
    fn transfer(&self, asset_id: AssetId, from: &AccountId, to: &AccountId)
        -> Result<(), AssetError>;
}

/// Value channel failures. All are treated as transient by the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("Credit to {account} rejected: {reason}")]
    Rejected { account: AccountId, reason: String },

    #[error("Value channel unavailable: {0}")]
    Unavailable(String),
}

/// Value transfer channel
///
/// Moves funds out of escrow. The recipient may be an arbitrary party, so a
/// call to `credit` may re-enter the service.
pub trait ValueTransfer: Send + Sync {
    fn credit(&self, recipient: &AccountId, amount: Amount) -> Result<(), TransferError>;
}

/// Event/notification sink
///
/// Fire-and-forget: delivery failures are the sink's concern.
pub trait AuctionEventSink: Send + Sync {
    fn emit(&self, event: AuctionEvent);
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}
