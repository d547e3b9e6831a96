//! # Auction Lifecycle Flows
//!
//! End-to-end runs of the state machine:
//!
//! ```text
//! NoAuction → Active → Active' (bids) → Finalizable → Settled
//! ```
//!
//! Each test checks the conservation property as well as the outcome: every
//! accepted bid is either escrowed for the leader, credited back, or held
//! for withdrawal.

#[cfg(test)]
mod tests {
    use crate::harness::{AuctionHarness, GENESIS_MS};
    use auction_house::{
        AssetRegistry, AuctionApi, AuctionConfig, AuctionError, RefundOutcome,
        DEFAULT_AUCTION_DURATION_MS,
    };
    use auction_telemetry::{init_telemetry, TelemetryConfig};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use shared_types::{AccountId, Amount};

    fn seller() -> AccountId {
        AuctionHarness::account(0)
    }

    fn quiet_logs() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        };
        // Another test may have installed the subscriber already.
        let _ = init_telemetry(&config);
    }

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    #[test]
    fn test_reference_scenario() {
        quiet_logs();
        let h = AuctionHarness::new();
        let (a, b) = (AuctionHarness::account(1), AuctionHarness::account(2));

        // Reserve 1.0 in milli-units
        let asset = h.open(seller(), 1_000);

        assert!(matches!(
            h.service.place_bid(asset, 500, a, 500),
            Err(AuctionError::BidTooLow { .. })
        ));

        h.service.place_bid(asset, 2_000, a, 2_000).unwrap();
        assert_eq!(h.service.escrowed_amount(asset), 2_000);

        assert!(matches!(
            h.service.place_bid(asset, 1_500, b, 1_500),
            Err(AuctionError::BidNotHighEnough { .. })
        ));
        assert_eq!(
            h.service.get_auction(asset).unwrap().current_bidder(),
            Some(a)
        );

        h.service.place_bid(asset, 3_000, b, 3_000).unwrap();
        assert_eq!(h.channel.balance_of(&a), 2_000);
        assert_eq!(h.service.escrowed_amount(asset), 3_000);

        h.expire(asset);
        assert!(matches!(
            h.service.finalize_auction(asset, a),
            Err(AuctionError::NotHighestBidder { .. })
        ));

        h.service.finalize_auction(asset, b).unwrap();
        assert_eq!(h.assets.owner_of(asset), Ok(b));
        assert_eq!(h.channel.balance_of(&seller()), 3_000);
        assert!(matches!(
            h.service.get_auction(asset),
            Err(AuctionError::NoActiveAuction { .. })
        ));
        assert_eq!(h.service.total_escrowed(), 0);
    }

    #[test]
    fn test_winner_can_resell() {
        let h = AuctionHarness::new();
        let (a, b) = (AuctionHarness::account(1), AuctionHarness::account(2));

        let asset = h.open(seller(), 10);
        h.service.place_bid(asset, 50, a, 50).unwrap();
        h.expire(asset);
        h.service.finalize_auction(asset, a).unwrap();

        // Former owner can no longer auction it
        assert!(matches!(
            h.service.start_auction(asset, 10, seller()),
            Err(AuctionError::NotOwner { .. })
        ));

        let second = h.service.start_auction(asset, 60, a).unwrap();
        h.service.place_bid(asset, 80, b, 80).unwrap();
        h.expire(asset);
        let settlement = h.service.finalize_auction(asset, b).unwrap();

        assert_eq!(settlement.auction_id, second.auction_id);
        assert_eq!(settlement.former_owner, a);
        assert_eq!(h.channel.balance_of(&a), 80);
        assert_eq!(h.assets.owner_of(asset), Ok(b));
    }

    #[test]
    fn test_independent_assets_do_not_interfere() {
        let h = AuctionHarness::new();
        let (a, b) = (AuctionHarness::account(1), AuctionHarness::account(2));

        let first = h.open(seller(), 10);
        let second = h.open(seller(), 10);

        h.service.place_bid(first, 100, a, 100).unwrap();
        h.service.place_bid(second, 20, b, 20).unwrap();
        assert_eq!(h.service.active_auction_count(), 2);

        h.expire(first);
        h.service.finalize_auction(first, a).unwrap();

        assert_eq!(h.service.active_auction_count(), 1);
        assert_eq!(h.service.escrowed_amount(second), 20);
        assert_eq!(h.service.total_escrowed(), 20);
    }

    #[test]
    fn test_expiry_uses_configured_duration() {
        let h = AuctionHarness::with_config(AuctionConfig::default().with_duration_ms(60_000));
        let record = h
            .service
            .start_auction(h.mint(seller()), 1, seller())
            .unwrap();
        assert_eq!(record.end_time, GENESIS_MS + 60_000);

        let h = AuctionHarness::new();
        let record = h
            .service
            .start_auction(h.mint(seller()), 1, seller())
            .unwrap();
        assert_eq!(record.end_time, GENESIS_MS + DEFAULT_AUCTION_DURATION_MS);
    }

    // =============================================================================
    // BIDLESS AUCTIONS
    // =============================================================================

    #[test]
    fn test_bidless_auction_reclaimed_then_reopened() {
        let h = AuctionHarness::new();
        let asset = h.open(seller(), 10);
        h.expire(asset);

        assert!(h.service.finalize_auction(asset, seller()).is_err());
        h.service.reclaim_unsold(asset, seller()).unwrap();
        assert!(h.service.start_auction(asset, 10, seller()).is_ok());
    }

    #[test]
    fn test_bidless_auction_stuck_in_strict_mode() {
        let h = AuctionHarness::with_config(AuctionConfig::default().strict());
        let asset = h.open(seller(), 10);
        h.expire(asset);

        assert_eq!(
            h.service.reclaim_unsold(asset, seller()),
            Err(AuctionError::ReclaimDisabled)
        );
        assert!(matches!(
            h.service.start_auction(asset, 10, seller()),
            Err(AuctionError::AuctionAlreadyActive { .. })
        ));
        // No bid can rescue it either
        assert!(matches!(
            h.service.place_bid(asset, 100, AuctionHarness::account(1), 100),
            Err(AuctionError::AuctionEnded { .. })
        ));
    }

    // =============================================================================
    // RANDOMISED SEQUENCES
    // =============================================================================

    /// Any mix of valid and invalid bids keeps the leader's escrow equal to
    /// the current bid and loses no funds.
    #[test]
    fn test_random_bid_sequences_conserve_funds() {
        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let h = AuctionHarness::new();
            let asset = h.open(seller(), 100);

            let mut accepted: Amount = 0;
            let mut last_bid: Amount = 0;

            for _ in 0..200 {
                let bidder = AuctionHarness::account(rng.gen_range(1..=8));
                let amount: Amount = rng.gen_range(0..5_000);
                // Mostly exact funding, sometimes off by one
                let provided = match rng.gen_range(0..10) {
                    0 => amount + 1,
                    1 => amount.saturating_sub(1),
                    _ => amount,
                };
                if rng.gen_bool(0.1) {
                    h.channel.fail_for(bidder);
                } else {
                    h.channel.restore(&bidder);
                }

                if let Ok(receipt) = h.service.place_bid(asset, amount, bidder, provided) {
                    assert!(amount > last_bid);
                    last_bid = amount;
                    accepted += amount;
                    if let Some(RefundOutcome::Held { .. }) = receipt.refund {
                        assert!(h.service.held_refund(&receipt.refund.unwrap().bidder()) > 0);
                    }
                }

                let record = h.service.get_auction(asset).unwrap();
                assert_eq!(record.current_bid(), last_bid);
                assert_eq!(h.service.escrowed_amount(asset), record.current_bid());
                assert_eq!(
                    accepted,
                    h.channel.total_credited()
                        + h.service.total_held_refunds()
                        + h.service.total_escrowed()
                );
            }
        }
    }
}
