//! Event sink abstraction.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::event::DomainEvent;

/// Published representation of a domain event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Service instance that produced the event.
    pub source_id: Uuid,
    /// Event type name.
    pub event_type: String,
    /// Serialized event payload.
    pub payload: serde_json::Value,
    /// Sequence number within the source stream.
    pub sequence_number: i64,
    /// Correlation ID of the run that caused the event.
    pub correlation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

impl PublishedEvent {
    /// Converts any domain event into its published form.
    #[must_use]
    pub fn from_event(event: &dyn DomainEvent) -> Self {
        let meta = event.metadata();
        Self {
            event_id: meta.event_id,
            source_id: meta.source_id,
            event_type: event.event_type().to_owned(),
            payload: event.to_payload(),
            sequence_number: meta.sequence_number,
            correlation_id: meta.correlation_id,
            occurred_at: meta.occurred_at,
        }
    }
}

/// Receiver of every event the orchestrator publishes (UI bridges,
/// journals, diagnostics).
pub trait EventSink: Send {
    /// Handles one published event.
    fn publish(&mut self, event: &PublishedEvent);
}
