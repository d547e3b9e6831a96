//! # Auction Telemetry
//!
//! Logging setup for the auction workspace.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auction_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_telemetry(&config).expect("Failed to init telemetry");
//!
//!     // Spans and events from every crate are now formatted and filtered
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AUCTION_SERVICE_NAME` | `auction-house` | Service name attached to logs |
//! | `AUCTION_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `AUCTION_JSON_LOGS` | `false` | Emit JSON lines instead of pretty text |
//! | `AUCTION_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("A global subscriber is already installed")]
    AlreadyInitialized,
}

/// Initialize logging for the process.
///
/// Safe to call more than once; every call after the first returns
/// `TelemetryError::AlreadyInitialized` and leaves the first subscriber in place.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_tracing(config)?;
    tracing::info!(
        service = %config.service_name,
        json = config.json_logs,
        "Telemetry initialized"
    );
    Ok(())
}

/// Convenience macro for creating a span scoped to one asset.
///
/// # Example
///
/// ```rust,ignore
/// use auction_telemetry::asset_span;
///
/// let _span = asset_span!("place_bid", asset_id, bidder = %bidder).entered();
/// ```
#[macro_export]
macro_rules! asset_span {
    ($name:expr, $asset_id:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name, asset_id = %$asset_id $(, $($field)*)?)
    };
}
