//! Structured log helpers.
//!
//! Every auction log line carries the same core fields so that one asset's
//! history can be reconstructed from the log stream:
//! - `asset_id`: the asset the operation touched
//! - `op`: the operation name (`start`, `bid`, `finalize`, `reclaim`, `withdraw`)
//! - additional context fields

/// Log an auction event with the standard `asset_id` and `op` fields.
///
/// # Example
///
/// ```rust,ignore
/// log_auction_event!(info, asset_id, "bid", "Bid accepted", amount = 10u64);
/// ```
#[macro_export]
macro_rules! log_auction_event {
    ($level:ident, $asset_id:expr, $op:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            asset_id = %$asset_id,
            op = $op,
            $($($field)*,)?
            $msg
        )
    };
}
