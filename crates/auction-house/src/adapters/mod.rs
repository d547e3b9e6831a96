//! Adapters for the auction subsystem's outbound ports.
//!
//! In-memory implementations used by tests, demos and single-process
//! deployments, plus the bus-backed event sink.

pub mod asset_registry;
pub mod clock;
pub mod event_sink;
pub mod value_channel;

pub use asset_registry::InMemoryAssetRegistry;
pub use clock::ManualTimeSource;
pub use event_sink::{BusEventSink, RecordingEventSink};
pub use value_channel::{CreditHook, InMemoryValueChannel};
