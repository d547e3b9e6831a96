//! # Griefing
//!
//! A party that refuses incoming funds must not be able to freeze an
//! auction for everyone else, and must not lose its own money either.
//!
//! ## Attack Vectors
//!
//! 1. Leader whose account rejects refunds, to block being outbid
//! 2. Seller whose account rejects the payout, to keep asset and escrow
//! 3. Channel outage during settlement
//! 4. Seller rejects the payout and breaks the asset return, hoping a retry
//!    settles against the winner's own account

#[cfg(test)]
mod tests {
    use crate::harness::AuctionHarness;
    use auction_house::{AssetRegistry, AuctionApi, AuctionError, AuctionStatus, RefundOutcome};
    use shared_types::{AccountId, Amount};
    use std::sync::Arc;

    #[test]
    fn test_refund_refuser_cannot_block_bidding() {
        let h = AuctionHarness::new();
        let griefer = AuctionHarness::account(13);
        let asset = h.open(AuctionHarness::account(0), 1);

        h.service.place_bid(asset, 10, griefer, 10).unwrap();
        h.channel.fail_for(griefer);

        for (i, amount) in [20u128, 30, 40].into_iter().enumerate() {
            let bidder = AuctionHarness::account(i as u8 + 1);
            h.service.place_bid(asset, amount, bidder, amount).unwrap();
        }

        // Only the griefer's own refund is parked
        assert_eq!(h.service.held_refund(&griefer), 10);
        assert_eq!(h.channel.total_credited(), 20 + 30);
        assert_eq!(h.service.escrowed_amount(asset), 40);
    }

    #[test]
    fn test_repeated_held_refunds_accumulate() {
        let h = AuctionHarness::new();
        let griefer = AuctionHarness::account(13);
        let other = AuctionHarness::account(1);
        let asset = h.open(AuctionHarness::account(0), 1);
        h.channel.fail_for(griefer);

        let mut held = 0;
        for round in 1..=5u128 {
            h.service.place_bid(asset, round * 20, griefer, round * 20).unwrap();
            let receipt = h
                .service
                .place_bid(asset, round * 20 + 10, other, round * 20 + 10)
                .unwrap();
            assert!(matches!(receipt.refund, Some(RefundOutcome::Held { .. })));
            held += round * 20;
        }

        assert_eq!(h.service.held_refund(&griefer), held);
        h.channel.restore(&griefer);
        assert_eq!(h.service.withdraw_refund(griefer), Ok(held));
    }

    #[test]
    fn test_payout_refuser_cannot_keep_both() {
        let h = AuctionHarness::new();
        let seller = AuctionHarness::account(0);
        let winner = AuctionHarness::account(1);
        let asset = h.open(seller, 1);
        h.service.place_bid(asset, 700, winner, 700).unwrap();
        h.expire(asset);

        h.channel.fail_for(seller);
        for _ in 0..3 {
            assert!(matches!(
                h.service.finalize_auction(asset, winner),
                Err(AuctionError::TransferFailed { .. })
            ));
            // Nothing moved; the auction is still waiting on its winner
            assert_eq!(h.assets.owner_of(asset), Ok(seller));
            assert_eq!(h.service.escrowed_amount(asset), 700);
            assert_eq!(
                h.service.get_auction(asset).unwrap().status,
                AuctionStatus::Active
            );
        }

        // Seller cannot sidestep by reclaiming
        assert!(matches!(
            h.service.reclaim_unsold(asset, seller),
            Err(AuctionError::AuctionHasBids { .. })
        ));
    }

    #[test]
    fn test_channel_outage_then_recovery() {
        let h = AuctionHarness::new();
        let seller = AuctionHarness::account(0);
        let winner = AuctionHarness::account(1);
        let asset = h.open(seller, 1);
        h.service.place_bid(asset, 250, winner, 250).unwrap();
        h.expire(asset);

        h.channel.set_fail_all(true);
        assert!(h.service.finalize_auction(asset, winner).is_err());
        h.channel.set_fail_all(false);

        let settlement = h.service.finalize_auction(asset, winner).unwrap();
        assert_eq!(settlement.final_bid, 250);
        assert_eq!(h.channel.balance_of(&seller), 250);
        assert_eq!(h.assets.owner_of(asset), Ok(winner));
    }

    #[test]
    fn test_failed_rollback_never_pays_winner_own_escrow() {
        let h = AuctionHarness::new();
        let seller = AuctionHarness::account(0);
        let winner = AuctionHarness::account(1);
        let asset = h.open(seller, 1);
        h.service.place_bid(asset, 500, winner, 500).unwrap();
        h.expire(asset);

        h.channel.fail_for(seller);
        let assets = Arc::clone(&h.assets);
        h.channel
            .set_hook(Arc::new(move |recipient: &AccountId, _amount: Amount| {
                if *recipient == seller {
                    assets.fail_next_transfer();
                }
            }));
        assert!(matches!(
            h.service.finalize_auction(asset, winner),
            Err(AuctionError::TransferFailed { amount: 500, .. })
        ));
        assert_eq!(
            h.service.get_auction(asset).unwrap().status,
            AuctionStatus::Quarantined
        );

        h.channel.clear_hook();
        h.channel.restore(&seller);
        for _ in 0..3 {
            assert_eq!(
                h.service.finalize_auction(asset, winner),
                Err(AuctionError::SettlementQuarantined { asset_id: asset })
            );
        }
        assert_eq!(h.channel.balance_of(&winner), 0);
        assert_eq!(h.channel.total_credited(), 0);
        assert_eq!(h.service.escrowed_amount(asset), 500);
    }
}
