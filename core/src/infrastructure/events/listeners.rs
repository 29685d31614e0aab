use futures::future::BoxFuture;
use tokio::sync::broadcast;
use tracing::info;

use crate::{
    domain::{
        common::{context::RequestContext, entities::app_errors::CoreError},
        crud::ports::CrudRepository,
        events::{entities::DomainEvent, ports::EventListener},
        footstep::entities::Footstep,
    },
    entity::footsteps,
    infrastructure::repositories::crud_repository::SeaCrudRepository,
};

/// Writes one structured log line per event.
pub struct TracingEventListener;

impl EventListener for TracingEventListener {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn handle<'a>(&'a self, event: &'a DomainEvent) -> BoxFuture<'a, Result<(), CoreError>> {
        Box::pin(async move {
            info!(
                event_type = %event.event_type,
                entity = %event.entity,
                entity_id = %event.entity_id,
                occurred_at = %event.occurred_at,
                "Domain event"
            );
            Ok(())
        })
    }
}

/// Persists every event as a footstep row.
pub struct FootstepRecorder {
    repository: SeaCrudRepository<footsteps::Entity>,
}

impl FootstepRecorder {
    pub fn new(repository: SeaCrudRepository<footsteps::Entity>) -> Self {
        Self { repository }
    }
}

impl EventListener for FootstepRecorder {
    fn name(&self) -> &'static str {
        "footsteps"
    }

    fn handle<'a>(&'a self, event: &'a DomainEvent) -> BoxFuture<'a, Result<(), CoreError>> {
        Box::pin(async move {
            let ctx = RequestContext::default();
            self.repository
                .create(&ctx, Footstep::from(event))
                .await
                .map(|_| ())
        })
    }
}

/// Relays events to live subscribers such as websocket clients.
#[derive(Clone)]
pub struct LiveUpdateListener {
    sender: broadcast::Sender<DomainEvent>,
}

impl LiveUpdateListener {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl EventListener for LiveUpdateListener {
    fn name(&self) -> &'static str {
        "live-updates"
    }

    fn handle<'a>(&'a self, event: &'a DomainEvent) -> BoxFuture<'a, Result<(), CoreError>> {
        // Nobody listening is not an error.
        let _ = self.sender.send(event.clone());
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sea_orm::{ConnectOptions, Database, EntityTrait, PaginatorTrait};
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::{
        domain::events::entities::EventAction, infrastructure::db::schema::create_schema,
    };

    fn event() -> DomainEvent {
        DomainEvent::new(
            "branch",
            Uuid::nil(),
            EventAction::Updated,
            json!({ "code": "NRB-01" }),
        )
    }

    #[tokio::test]
    async fn live_updates_reach_subscribers() {
        let listener = LiveUpdateListener::new(8);
        let mut receiver = listener.subscribe();

        listener.handle(&event()).await.unwrap();

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.event_type, "branch.updated");
    }

    #[tokio::test]
    async fn live_updates_without_subscribers_succeed() {
        let listener = LiveUpdateListener::new(8);
        assert!(listener.handle(&event()).await.is_ok());
    }

    #[tokio::test]
    async fn footstep_recorder_writes_a_row() {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1);
        let db = Arc::new(Database::connect(options).await.unwrap());
        create_schema(&db).await.unwrap();

        let recorder = FootstepRecorder::new(SeaCrudRepository::new(Arc::clone(&db)));
        recorder.handle(&event()).await.unwrap();

        let rows = footsteps::Entity::find().all(db.as_ref()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].resource, "branch");
        assert_eq!(rows[0].action, "updated");
        assert_eq!(rows[0].payload["code"], "NRB-01");
        assert_eq!(footsteps::Entity::find().count(db.as_ref()).await.unwrap(), 1);
    }
}
