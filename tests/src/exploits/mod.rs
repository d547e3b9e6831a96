//! # Exploit Simulations
//!
//! Adversarial scenarios against the auction core. Each test sets up the
//! attack, runs it, and asserts that no funds moved that should not have.
//!
//! | Module | Attack |
//! |--------|--------|
//! | `reentrancy` | Recipient calls back into the service while being credited |
//! | `replay` | Repeated, stale, or out-of-order operations |
//! | `griefing` | Refusing funds to freeze an auction |

pub mod griefing;
