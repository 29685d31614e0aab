use std::time::Duration;

use crate::domain::{
    crud::ports::CrudRepository,
    media::{entities::Media, ports::ObjectStoragePort},
};

/// Holds the ports domain services are implemented against.
#[derive(Clone)]
pub struct Service<MR, OS>
where
    MR: CrudRepository<Media>,
    OS: ObjectStoragePort,
{
    pub(crate) media_repository: MR,
    pub(crate) object_storage: OS,
    pub(crate) presign_ttl: Duration,
}

impl<MR, OS> Service<MR, OS>
where
    MR: CrudRepository<Media>,
    OS: ObjectStoragePort,
{
    pub const DEFAULT_PRESIGN_TTL: Duration = Duration::from_secs(300);

    pub fn new(media_repository: MR, object_storage: OS) -> Self {
        Self {
            media_repository,
            object_storage,
            presign_ttl: Self::DEFAULT_PRESIGN_TTL,
        }
    }

    pub fn with_presign_ttl(mut self, presign_ttl: Duration) -> Self {
        if !presign_ttl.is_zero() {
            self.presign_ttl = presign_ttl;
        }
        self
    }
}
