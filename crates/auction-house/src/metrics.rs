//! # Auction Metrics
//!
//! Prometheus metrics for monitoring auction activity.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! auction-house = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `auction_started_total` - Counter of auctions opened
//! - `auction_bids_accepted_total` - Counter of accepted bids
//! - `auction_bids_rejected_total` - Counter of rejected bids (by reason)
//! - `auction_refunds_paid_total` - Counter of outbid refunds delivered immediately
//! - `auction_refunds_held_total` - Counter of outbid refunds parked for withdrawal
//! - `auction_settled_total` - Counter of successful finalizations
//! - `auction_settlements_aborted_total` - Counter of finalizations rolled back (by reason)
//! - `auction_settlements_quarantined_total` - Counter of settlements frozen after a failed rollback
//! - `auction_reclaimed_total` - Counter of bidless auctions closed by their owner

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total auctions opened
    pub static ref AUCTIONS_STARTED: IntCounter = register_int_counter!(
        "auction_started_total",
        "Total number of auctions opened"
    )
    .expect("Failed to create AUCTIONS_STARTED metric");

    /// Total bids accepted
    pub static ref BIDS_ACCEPTED: IntCounter = register_int_counter!(
        "auction_bids_accepted_total",
        "Total number of bids accepted"
    )
    .expect("Failed to create BIDS_ACCEPTED metric");

    /// Total bids rejected, labeled by reason
    pub static ref BIDS_REJECTED: IntCounterVec = register_int_counter_vec!(
        "auction_bids_rejected_total",
        "Total number of bids rejected",
        &["reason"]
    )
    .expect("Failed to create BIDS_REJECTED metric");

    /// Refunds credited immediately
    pub static ref REFUNDS_PAID: IntCounter = register_int_counter!(
        "auction_refunds_paid_total",
        "Total number of outbid refunds delivered"
    )
    .expect("Failed to create REFUNDS_PAID metric");

    /// Refunds parked for manual withdrawal
    pub static ref REFUNDS_HELD: IntCounter = register_int_counter!(
        "auction_refunds_held_total",
        "Total number of outbid refunds held for withdrawal"
    )
    .expect("Failed to create REFUNDS_HELD metric");

    /// Successful settlements
    pub static ref AUCTIONS_SETTLED: IntCounter = register_int_counter!(
        "auction_settled_total",
        "Total number of auctions settled"
    )
    .expect("Failed to create AUCTIONS_SETTLED metric");

    /// Settlements rolled back, labeled by reason
    pub static ref SETTLEMENTS_ABORTED: IntCounterVec = register_int_counter_vec!(
        "auction_settlements_aborted_total",
        "Total number of settlements rolled back",
        &["reason"]
    )
    .expect("Failed to create SETTLEMENTS_ABORTED metric");

    /// Settlements whose rollback failed
    pub static ref SETTLEMENTS_QUARANTINED: IntCounter = register_int_counter!(
        "auction_settlements_quarantined_total",
        "Total number of settlements frozen after a failed rollback"
    )
    .expect("Failed to create SETTLEMENTS_QUARANTINED metric");

    /// Bidless auctions reclaimed by owner
    pub static ref AUCTIONS_RECLAIMED: IntCounter = register_int_counter!(
        "auction_reclaimed_total",
        "Total number of unsold auctions reclaimed"
    )
    .expect("Failed to create AUCTIONS_RECLAIMED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

#[cfg(feature = "metrics")]
pub fn record_auction_started() {
    AUCTIONS_STARTED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_bid_accepted() {
    BIDS_ACCEPTED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_bid_rejected(reason: &str) {
    BIDS_REJECTED.with_label_values(&[reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_refund(held: bool) {
    if held {
        REFUNDS_HELD.inc();
    } else {
        REFUNDS_PAID.inc();
    }
}

#[cfg(feature = "metrics")]
pub fn record_settled() {
    AUCTIONS_SETTLED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_settlement_aborted(reason: &str) {
    SETTLEMENTS_ABORTED.with_label_values(&[reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_settlement_quarantined() {
    SETTLEMENTS_QUARANTINED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_reclaimed() {
    AUCTIONS_RECLAIMED.inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_auction_started() {}

#[cfg(not(feature = "metrics"))]
pub fn record_bid_accepted() {}

#[cfg(not(feature = "metrics"))]
pub fn record_bid_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_refund(_held: bool) {}

#[cfg(not(feature = "metrics"))]
pub fn record_settled() {}

#[cfg(not(feature = "metrics"))]
pub fn record_settlement_aborted(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_settlement_quarantined() {}

#[cfg(not(feature = "metrics"))]
pub fn record_reclaimed() {}
