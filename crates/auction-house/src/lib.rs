//! # auction-house
//!
//! Timed single-item auctions over uniquely owned assets, backed by an
//! escrow ledger.
//!
//! ## Overview
//!
//! This crate provides:
//! - **Auction Registry**: at most one auction per asset, per-asset locking
//! - **Escrow Ledger**: leader funds held until refund or payout, each released once
//! - **Bidding Engine**: strictly increasing, exactly funded bids with refund-on-outbid
//! - **Settlement Engine**: time-gated finalize swapping asset for escrow atomically
//!
//! ## Architecture
//!
//! ```text
//! Owner ──start_auction──→ Registry
//!                              │
//! Bidder ──place_bid──→ Bidding Engine ──deposit / refund──→ Ledger ──credit──→ Value Channel
//!                              │
//! Winner ──finalize──→ Settlement Engine ──transfer──→ Asset Registry
//!                              │
//!                              └── AuctionEvent ──→ Event Sink (shared-bus)
//! ```
//!
//! ## Failure Policy
//!
//! | Failure | Effect |
//! |---------|--------|
//! | Outbid refund credit fails | Bid stands, refund held for `withdraw_refund` |
//! | Asset transfer fails at finalize | Finalize aborted, nothing moved |
//! | Payout credit fails at finalize | Asset returned, escrow restored, finalize aborted |
//! | Asset return fails after that | Auction quarantined, no further settlement |
//! | Asset no longer held by seller | Finalize refused, nothing moved |
//!
//! ## Example
//!
//! ```rust,ignore
//! use auction_house::adapters::{
//!     InMemoryAssetRegistry, InMemoryValueChannel, ManualTimeSource, RecordingEventSink,
//! };
//! use auction_house::{AuctionApi, AuctionConfig, AuctionService};
//!
//! let assets = Arc::new(InMemoryAssetRegistry::new());
//! let service = AuctionService::new(
//!     AuctionConfig::from_env(),
//!     assets.clone(),
//!     Arc::new(InMemoryValueChannel::new()),
//!     Arc::new(RecordingEventSink::new()),
//!     Arc::new(ManualTimeSource::new(0)),
//! )?;
//!
//! let asset = assets.mint(seller);
//! service.start_auction(asset, 1_000, seller)?;
//! service.place_bid(asset, 2_000, bidder, 2_000)?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use config::{AuctionConfig, ConfigError};
pub use domain::{
    AuctionRecord, AuctionStatus, Bid, BidReceipt, EscrowEntry, RefundOutcome, Settlement,
    DEFAULT_AUCTION_DURATION_MS,
};
pub use error::{AuctionError, AuctionResult};
pub use ports::inbound::AuctionApi;
pub use ports::outbound::{
    AssetError, AssetRegistry, AuctionEventSink, SystemTimeSource, TimeSource, TransferError,
    ValueTransfer,
};
pub use service::AuctionService;
