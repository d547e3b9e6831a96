//! # Concurrency
//!
//! Operations on one asset are totally ordered; operations on different
//! assets proceed independently. These tests hammer the service from many
//! threads and check the ledger afterwards.

#[cfg(test)]
mod tests {
    use crate::harness::AuctionHarness;
    use auction_house::{AssetRegistry, AuctionApi, AuctionError};
    use parking_lot::Mutex;
    use rand::Rng;
    use shared_types::{Amount, AssetId};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    const THREADS: usize = 8;

    #[test]
    fn test_concurrent_bids_keep_single_leader() {
        let h = AuctionHarness::new();
        let asset = h.open(AuctionHarness::account(0), 1);
        let accepted = Arc::new(Mutex::new(Vec::<Amount>::new()));
        let barrier = Barrier::new(THREADS);

        thread::scope(|s| {
            for t in 0..THREADS {
                let service = Arc::clone(&h.service);
                let accepted = Arc::clone(&accepted);
                let barrier = &barrier;
                s.spawn(move || {
                    let bidder = AuctionHarness::account(t as u8 + 1);
                    let mut rng = rand::thread_rng();
                    barrier.wait();
                    for _ in 0..500 {
                        let amount: Amount = rng.gen_range(1..100_000);
                        if service.place_bid(asset, amount, bidder, amount).is_ok() {
                            accepted.lock().push(amount);
                        }
                    }
                });
            }
        });

        let accepted = accepted.lock();
        let highest = accepted.iter().copied().max().unwrap_or(0);
        let total: Amount = accepted.iter().sum();
        let record = h.service.get_auction(asset).unwrap();

        assert_eq!(record.current_bid(), highest);
        assert_eq!(h.service.escrowed_amount(asset), highest);
        // Everyone but the leader got their money back
        assert_eq!(h.channel.total_credited(), total - highest);
    }

    #[test]
    fn test_concurrent_starts_create_one_auction() {
        let h = AuctionHarness::new();
        let seller = AuctionHarness::account(0);
        let asset = h.mint(seller);
        let successes = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);

        thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    barrier.wait();
                    match h.service.start_auction(asset, 10, seller) {
                        Ok(_) => {
                            successes.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(err) => {
                            assert!(matches!(err, AuctionError::AuctionAlreadyActive { .. }))
                        }
                    }
                });
            }
        });

        assert_eq!(successes.load(Ordering::SeqCst), 1);
        assert_eq!(h.service.active_auction_count(), 1);
    }

    #[test]
    fn test_concurrent_finalize_settles_once() {
        let h = AuctionHarness::new();
        let seller = AuctionHarness::account(0);
        let winner = AuctionHarness::account(1);
        let asset = h.open(seller, 1);
        h.service.place_bid(asset, 1_000, winner, 1_000).unwrap();
        h.expire(asset);

        let successes = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);

        thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    barrier.wait();
                    match h.service.finalize_auction(asset, winner) {
                        Ok(_) => {
                            successes.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(err) => assert!(matches!(
                            err,
                            AuctionError::NoActiveAuction { .. }
                                | AuctionError::SettlementInProgress { .. }
                        )),
                    }
                });
            }
        });

        assert_eq!(successes.load(Ordering::SeqCst), 1);
        assert_eq!(h.channel.balance_of(&seller), 1_000);
        assert_eq!(h.assets.owner_of(asset), Ok(winner));
    }

    #[test]
    fn test_parallel_auctions_on_many_assets() {
        let h = AuctionHarness::new();
        let seller = AuctionHarness::account(0);
        let assets: Vec<AssetId> = (0..32).map(|_| h.open(seller, 1)).collect();

        thread::scope(|s| {
            for t in 0..THREADS {
                let service = Arc::clone(&h.service);
                let assets = &assets;
                s.spawn(move || {
                    let bidder = AuctionHarness::account(t as u8 + 1);
                    for round in 1..=50u128 {
                        for asset in assets {
                            let amount = round * 100 + t as u128;
                            let _ = service.place_bid(*asset, amount, bidder, amount);
                        }
                    }
                });
            }
        });

        let leaders: Amount = assets
            .iter()
            .map(|asset| h.service.get_auction(*asset).unwrap().current_bid())
            .sum();
        assert_eq!(h.service.total_escrowed(), leaders);
        assert_eq!(h.service.active_auction_count(), assets.len());
    }
}
