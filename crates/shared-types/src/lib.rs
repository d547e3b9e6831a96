//! # Shared Types Crate
//!
//! Identifier and value types used by every crate in the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Asset, account and amount types are defined
//!   here and nowhere else.
//! - **Opaque Identifiers**: `AssetId` and `AccountId` are newtypes so that an
//!   asset can never be passed where an account is expected.
//! - **Integer Money**: `Amount` is an unsigned count of the smallest currency
//!   unit. There is no floating point anywhere in the ledger.

pub mod entities;

pub use entities::*;
