//! # Integration Tests
//!
//! Cross-crate flows: the auction core driving the in-memory adapters and
//! publishing onto the shared bus.

pub mod auction_lifecycle;
pub mod concurrency;
