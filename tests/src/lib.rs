//! # Auction-House Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Fully wired in-memory service
//! │
//! ├── exploits/         # Attack simulations
//! │   ├── reentrancy.rs # Recipients calling back during credit
//! │   ├── replay.rs     # Repeated and stale operations
//! │   └── griefing.rs   # Refusing funds to block progress
//! │
//! └── integration/      # Cross-crate flows
//!     ├── auction_lifecycle.rs
//!     ├── event_choreography.rs
//!     └── concurrency.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p auction-tests
//!
//! # By category
//! cargo test -p auction-tests integration::
//! cargo test -p auction-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p auction-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod exploits;
pub mod integration;
