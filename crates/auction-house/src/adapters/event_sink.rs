//! Event sink adapters.
//!
//! `BusEventSink` publishes onto the shared bus (EDA choreography).
//! `RecordingEventSink` keeps everything in memory for assertions.

use crate::ports::outbound::AuctionEventSink;
use parking_lot::RwLock;
use shared_bus::{AuctionEvent, EventPublisher, InMemoryEventBus};
use std::sync::Arc;
use tracing::trace;

/// Publishes auction events on the shared event bus.
pub struct BusEventSink {
    event_bus: Arc<InMemoryEventBus>,
}

impl BusEventSink {
    pub fn new(event_bus: Arc<InMemoryEventBus>) -> Self {
        Self { event_bus }
    }

    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.event_bus
    }
}

impl AuctionEventSink for BusEventSink {
    fn emit(&self, event: AuctionEvent) {
        let topic = event.topic();
        let receivers = self.event_bus.publish(event);
        if receivers == 0 {
            // Nobody listening is fine; notifications are advisory.
            trace!(?topic, "No subscribers for auction event");
        }
    }
}

/// In-memory sink for testing.
#[derive(Default)]
pub struct RecordingEventSink {
    events: RwLock<Vec<AuctionEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events emitted so far, oldest first.
    pub fn events(&self) -> Vec<AuctionEvent> {
        self.events.read().clone()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl AuctionEventSink for RecordingEventSink {
    fn emit(&self, event: AuctionEvent) {
        self.events.write().push(event);
    }
}
