//! Ports for the auction subsystem
//!
//! Inbound: the `AuctionApi` driving port.
//! Outbound: asset registry, value channel, event sink and clock.

pub mod inbound;
pub mod outbound;

pub use inbound::AuctionApi;
pub use outbound::{
    AssetError, AssetRegistry, AuctionEventSink, SystemTimeSource, TimeSource, TransferError,
    ValueTransfer,
};
