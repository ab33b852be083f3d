//! EventSubscriber port - Interface for subscribing to domain events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// Handlers run after the command that produced the event has persisted
/// its changes, so a handler error never undoes a transition.
///
/// # Example
///
/// ```ignore
/// #[async_trait]
/// impl EventHandler for MailNotifier {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let doc_event: DocEvent = event.payload_as()?;
///         // compose and send...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "MailNotifier"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events.
///
/// ```ignore
/// bus.subscribe_all(&["doc.changed_state.v1", "doc.iesg_approved.v1"], notifier);
/// ```
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe handler to several event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

/// Publishing and subscribing in one.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
