//! Continuation tickets.
//!
//! A service that accepts a long-running request (show dialogue, ask a
//! question, move the camera) is handed a `Ticket`. When the request
//! finishes the service emits exactly one completion event carrying the
//! ticket, and the composition root routes it back to the ticket's owner.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an interactive object instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerId(String);

impl TriggerId {
    /// Creates a trigger identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TriggerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Who is waiting on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// An interactive object's choreography.
    Trigger(TriggerId),
    /// The chapter start/completion choreography.
    Chapter,
    /// The composition root itself (requests not tied to a choreography).
    Host,
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trigger(id) => write!(f, "trigger:{id}"),
            Self::Chapter => f.write_str("chapter"),
            Self::Host => f.write_str("host"),
        }
    }
}

/// Single-use continuation handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Identifier unique within the owner.
    pub id: u64,
    /// Who the completion is routed to.
    pub owner: Owner,
    /// Correlation ID of the run that issued the ticket.
    pub correlation_id: Uuid,
}

/// Issues tickets with increasing identifiers.
#[derive(Debug, Default)]
pub struct TicketIssuer {
    next_id: u64,
}

impl TicketIssuer {
    /// Issues a new ticket for `owner`.
    pub fn issue(&mut self, owner: Owner, correlation_id: Uuid) -> Ticket {
        self.next_id += 1;
        Ticket {
            id: self.next_id,
            owner,
            correlation_id,
        }
    }
}
