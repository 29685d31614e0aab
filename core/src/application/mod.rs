use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::{
    domain::common::{CoopdeskConfig, entities::app_errors::CoreError, services::Service},
    entity::{branches, footsteps, media, members},
    infrastructure::{
        db::{errors::translate_db_error, postgres::Postgres},
        events::{
            bus::EventBus,
            listeners::{FootstepRecorder, LiveUpdateListener, TracingEventListener},
        },
        object_storage::s3::S3ObjectStorage,
        query::combinator::UnsupportedPolicy,
        repositories::crud_repository::SeaCrudRepository,
    },
};

pub type BranchRepository = SeaCrudRepository<branches::Entity, EventBus>;
pub type MemberRepository = SeaCrudRepository<members::Entity, EventBus>;
pub type MediaRepository = SeaCrudRepository<media::Entity, EventBus>;
pub type FootstepRepository = SeaCrudRepository<footsteps::Entity>;
pub type MediaManager = Service<MediaRepository, S3ObjectStorage>;

/// Everything the HTTP layer needs, wired once at startup.
#[derive(Clone)]
pub struct CoopdeskService {
    db: Arc<DatabaseConnection>,
    pub event_bus: EventBus,
    pub live_updates: LiveUpdateListener,
    pub branches: Arc<BranchRepository>,
    pub members: Arc<MemberRepository>,
    pub media_records: Arc<MediaRepository>,
    pub footsteps: Arc<FootstepRepository>,
    pub media: Arc<MediaManager>,
}

impl CoopdeskService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        object_storage: S3ObjectStorage,
        config: &CoopdeskConfig,
    ) -> Self {
        let policy = if config.filters.skip_unsupported {
            UnsupportedPolicy::SkipWithWarning
        } else {
            UnsupportedPolicy::Reject
        };
        let presign_ttl = Duration::from_secs(config.object_storage.presign_ttl_secs);

        let live_updates = LiveUpdateListener::new(config.events.live_update_capacity);
        let event_bus = EventBus::new(vec![
            Arc::new(TracingEventListener),
            Arc::new(FootstepRecorder::new(SeaCrudRepository::new(db.clone()))),
            Arc::new(live_updates.clone()),
        ]);

        let media_records = SeaCrudRepository::<media::Entity>::new(db.clone())
            .with_publisher(event_bus.clone())
            .with_policy(policy);

        Self {
            branches: Arc::new(
                SeaCrudRepository::new(db.clone())
                    .with_publisher(event_bus.clone())
                    .with_policy(policy),
            ),
            members: Arc::new(
                SeaCrudRepository::new(db.clone())
                    .with_publisher(event_bus.clone())
                    .with_policy(policy),
            ),
            footsteps: Arc::new(SeaCrudRepository::new(db.clone()).with_policy(policy)),
            media: Arc::new(
                Service::new(media_records.clone(), object_storage).with_presign_ttl(presign_ttl),
            ),
            media_records: Arc::new(media_records),
            live_updates,
            event_bus,
            db,
        }
    }

    /// Round trip to the database, for health checks.
    pub async fn ping(&self) -> Result<(), CoreError> {
        self.db
            .ping()
            .await
            .map_err(|err| translate_db_error(err, "ping"))
    }
}

pub async fn create_service(config: CoopdeskConfig) -> Result<CoopdeskService, anyhow::Error> {
    let postgres = Postgres::new(&config.database).await?;
    postgres.migrate().await?;

    let object_storage = S3ObjectStorage::new(&config.object_storage);
    let service = CoopdeskService::new(postgres.get_db(), object_storage, &config);

    info!(
        listeners = ?service.event_bus.listener_names(),
        "Coopdesk service ready"
    );
    Ok(service)
}
