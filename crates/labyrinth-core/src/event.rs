//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Dotted type name, e.g. `dialogue.completed`.
    pub event_type: String,
    /// The service instance that produced the event.
    pub source_id: Uuid,
    /// Monotonically increasing number within the source's stream.
    pub sequence_number: i64,
    /// Correlation ID of the choreography run that caused the event.
    pub correlation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}

/// Payload enums of each context implement this to name their variants.
pub trait EventKind: Serialize + Clone + Send + Sync + std::fmt::Debug {
    /// Returns the dotted type name for this payload variant.
    fn event_type(&self) -> &'static str;
}

/// Domain event envelope: metadata plus a context-specific payload.
#[derive(Debug, Clone)]
pub struct Envelope<K> {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: K,
}

impl<K: EventKind> DomainEvent for Envelope<K> {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("event payload serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
