//! Domain layer: auction records, the per-asset registry and escrow.

pub mod entities;
pub mod ledger;
pub mod registry;

pub use entities::*;
pub use ledger::EscrowLedger;
pub use registry::{AuctionRegistry, AuctionSlot};
