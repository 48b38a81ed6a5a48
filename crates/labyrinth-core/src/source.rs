//! Event sources and the outbox they buffer events in.
//!
//! Every orchestration service records what happened as events. Nothing is
//! published directly: events wait in the service's outbox until the
//! composition root drains them, routes completions and hands them to the
//! event sink.

use uuid::Uuid;

use crate::clock::Clock;
use crate::event::{DomainEvent, Envelope, EventKind, EventMetadata};

/// Trait for services that produce domain events.
pub trait EventSource {
    /// The event type this source produces.
    type Event: DomainEvent;

    /// Returns the source identifier stamped on every event.
    fn source_id(&self) -> Uuid;

    /// Returns events recorded but not yet drained.
    fn pending_events(&self) -> &[Self::Event];

    /// Removes and returns all pending events.
    fn take_pending_events(&mut self) -> Vec<Self::Event>;
}

/// Buffer of events waiting to be drained.
#[derive(Debug)]
pub struct Outbox<K> {
    source_id: Uuid,
    drained: i64,
    pending: Vec<Envelope<K>>,
}

impl<K: EventKind> Outbox<K> {
    /// Creates an empty outbox for the given source.
    #[must_use]
    pub fn new(source_id: Uuid) -> Self {
        Self {
            source_id,
            drained: 0,
            pending: Vec::new(),
        }
    }

    /// Returns the source identifier.
    #[must_use]
    pub fn source_id(&self) -> Uuid {
        self.source_id
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.drained + self.pending.len() as i64 + 1
    }

    /// Records a new event and returns its identifier.
    pub fn record(&mut self, kind: K, correlation_id: Uuid, clock: &dyn Clock) -> Uuid {
        let event_id = Uuid::new_v4();
        let metadata = EventMetadata {
            event_id,
            event_type: kind.event_type().to_owned(),
            source_id: self.source_id,
            sequence_number: self.next_sequence_number(),
            correlation_id,
            occurred_at: clock.now(),
        };
        self.pending.push(Envelope { metadata, kind });
        event_id
    }

    /// Returns events recorded but not yet drained.
    #[must_use]
    pub fn pending(&self) -> &[Envelope<K>] {
        &self.pending
    }

    /// Removes and returns all pending events.
    #[allow(clippy::cast_possible_wrap)]
    pub fn take(&mut self) -> Vec<Envelope<K>> {
        self.drained += self.pending.len() as i64;
        std::mem::take(&mut self.pending)
    }
}
