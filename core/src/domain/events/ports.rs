use std::sync::Arc;

use futures::future::BoxFuture;

use crate::domain::{common::entities::app_errors::CoreError, events::entities::DomainEvent};

/// Fire-and-forget publication of domain events.
///
/// Implementations must return immediately: no awaiting listeners, no error back to the
/// writer.
#[cfg_attr(test, mockall::automock)]
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: DomainEvent);
}

impl<P: EventPublisher + ?Sized> EventPublisher for Arc<P> {
    fn publish(&self, event: DomainEvent) {
        (**self).publish(event)
    }
}

/// Asynchronous consumer registered on an event bus.
pub trait EventListener: Send + Sync {
    fn name(&self) -> &'static str;

    fn handle<'a>(&'a self, event: &'a DomainEvent) -> BoxFuture<'a, Result<(), CoreError>>;
}

/// Publisher that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventPublisher;

impl EventPublisher for NoopEventPublisher {
    fn publish(&self, _event: DomainEvent) {}
}
