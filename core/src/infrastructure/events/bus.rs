use std::{panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use tokio::runtime::Handle;
use tracing::{error, warn};

use crate::domain::events::{
    entities::DomainEvent,
    ports::{EventListener, EventPublisher},
};

/// In-process fan-out. Each listener runs in its own task so a slow or failing listener
/// never holds up the writer or the other listeners.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Arc<Vec<Arc<dyn EventListener>>>,
}

impl EventBus {
    pub fn new(listeners: Vec<Arc<dyn EventListener>>) -> Self {
        Self {
            listeners: Arc::new(listeners),
        }
    }

    pub fn listener_names(&self) -> Vec<&'static str> {
        self.listeners.iter().map(|listener| listener.name()).collect()
    }
}

impl EventPublisher for EventBus {
    fn publish(&self, event: DomainEvent) {
        let Ok(runtime) = Handle::try_current() else {
            warn!(event_type = %event.event_type, "No runtime to dispatch event on, dropping it");
            return;
        };

        let event = Arc::new(event);
        for listener in self.listeners.iter() {
            let listener = Arc::clone(listener);
            let event = Arc::clone(&event);

            runtime.spawn(async move {
                let outcome = AssertUnwindSafe(listener.handle(&event))
                    .catch_unwind()
                    .await;

                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => error!(
                        listener = listener.name(),
                        event_type = %event.event_type,
                        error = %err,
                        "Event listener failed"
                    ),
                    Err(_) => error!(
                        listener = listener.name(),
                        event_type = %event.event_type,
                        "Event listener panicked"
                    ),
                }
            });
        }
    }
}
