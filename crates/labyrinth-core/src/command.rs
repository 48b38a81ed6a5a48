//! Requests addressed to a single service.

use uuid::Uuid;

/// A request handed to a service's command handler.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name for logging, e.g. `camera.move`.
    fn command_type(&self) -> &'static str;

    /// The choreography run this request belongs to. Events recorded while
    /// handling it carry the same id.
    fn correlation_id(&self) -> Uuid;
}
