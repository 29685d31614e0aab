use sha2::{Digest, Sha256};
use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    common::{
        context::RequestContext, entities::app_errors::CoreError, generate_random_string,
        generate_uuid_v7, services::Service,
    },
    crud::ports::CrudRepository,
    media::{
        entities::{Media, PresignedUrl},
        ports::{MediaService, ObjectStoragePort},
        value_objects::{MAX_UPLOAD_BYTES, UploadMediaInput},
    },
};

impl<MR, OS> MediaService for Service<MR, OS>
where
    MR: CrudRepository<Media>,
    OS: ObjectStoragePort,
{
    #[instrument(skip(self, ctx, input), fields(file_name = %input.file_name, size = input.data.len()))]
    async fn upload_media(
        &self,
        ctx: &RequestContext,
        input: UploadMediaInput,
    ) -> Result<Media, CoreError> {
        if input.data.is_empty() {
            return Err(CoreError::Invalid("file is empty".to_string()));
        }
        if input.data.len() > MAX_UPLOAD_BYTES {
            return Err(CoreError::FileTooLarge);
        }

        let file_name = input.file_name.trim().to_string();
        if file_name.is_empty() {
            return Err(CoreError::Invalid("file name is required".to_string()));
        }

        let checksum = hex::encode(Sha256::digest(&input.data));
        let size_bytes = i64::try_from(input.data.len()).map_err(|_| CoreError::FileTooLarge)?;
        let bucket = self.object_storage.bucket_name();
        let object_key = format!(
            "{}/{}/{}",
            generate_uuid_v7(),
            generate_random_string(16),
            urlencoding::encode(&file_name)
        );

        ctx.run(self.object_storage.put_object(
            &bucket,
            &object_key,
            input.data,
            &input.mime_type,
        ))
        .await?;

        let media = Media::new(
            file_name,
            bucket.clone(),
            object_key.clone(),
            input.mime_type,
            size_bytes,
            checksum,
        );

        match self.media_repository.create(ctx, media).await {
            Ok(media) => {
                tracing::info!(media_id = %media.id, object_key = %media.object_key, "Media uploaded");
                Ok(media)
            }
            Err(err) => {
                // The row is the source of truth; drop the orphaned object.
                if let Err(cleanup) = self.object_storage.delete_object(&bucket, &object_key).await
                {
                    tracing::warn!(
                        error = %cleanup,
                        object_key = %object_key,
                        "Failed to remove object after metadata insert failed"
                    );
                }
                Err(err)
            }
        }
    }

    #[instrument(skip(self, ctx))]
    async fn get_download_url(
        &self,
        ctx: &RequestContext,
        media_id: Uuid,
    ) -> Result<PresignedUrl, CoreError> {
        let media = self.media_repository.find_by_id(ctx, media_id, &[]).await?;

        ctx.run(self.object_storage.presign_get_url(
            &media.bucket,
            &media.object_key,
            self.presign_ttl,
        ))
        .await
    }

    #[instrument(skip(self, ctx))]
    async fn delete_media(&self, ctx: &RequestContext, media_id: Uuid) -> Result<(), CoreError> {
        let media = self.media_repository.find_by_id(ctx, media_id, &[]).await?;

        ctx.run(
            self.object_storage
                .delete_object(&media.bucket, &media.object_key),
        )
        .await?;

        self.media_repository.delete(ctx, media_id).await?;

        tracing::info!(media_id = %media_id, "Media deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use bytes::Bytes;

    use super::*;
    use crate::domain::{
        common::entities::app_errors::ConstraintViolation,
        query::{
            filter::PaginatedRequest,
            pagination::{ListResponse, PageWindow, Pagination, SortOrder},
        },
    };

    #[derive(Default)]
    struct InMemoryMediaRepository {
        rows: Mutex<HashMap<Uuid, Media>>,
        reject_inserts: bool,
    }

    impl CrudRepository<Media> for InMemoryMediaRepository {
        async fn create(&self, _ctx: &RequestContext, entity: Media) -> Result<Media, CoreError> {
            if self.reject_inserts {
                return Err(CoreError::constraint(
                    ConstraintViolation::Unique,
                    "media_object_key_key",
                ));
            }
            self.rows.lock().unwrap().insert(entity.id, entity.clone());
            Ok(entity)
        }

        async fn find_by_id(
            &self,
            _ctx: &RequestContext,
            id: Uuid,
            _preloads: &[String],
        ) -> Result<Media, CoreError> {
            self.rows
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(CoreError::NotFound)
        }

        async fn find_all(
            &self,
            _ctx: &RequestContext,
            _preloads: &[String],
        ) -> Result<Vec<Media>, CoreError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn list(
            &self,
            _ctx: &RequestContext,
            request: PaginatedRequest,
            _preloads: &[String],
        ) -> Result<ListResponse<Media>, CoreError> {
            let data: Vec<Media> = self.rows.lock().unwrap().values().cloned().collect();
            let window = PageWindow::new(request.page_index, request.page_size);
            Ok(ListResponse {
                pagination: Pagination::compute(
                    window,
                    data.len() as u64,
                    "id".to_string(),
                    SortOrder::Asc,
                ),
                data,
                warnings: vec![],
            })
        }

        async fn update(&self, _ctx: &RequestContext, entity: Media) -> Result<Media, CoreError> {
            self.rows.lock().unwrap().insert(entity.id, entity.clone());
            Ok(entity)
        }

        async fn delete(&self, _ctx: &RequestContext, id: Uuid) -> Result<(), CoreError> {
            self.rows
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(CoreError::NotFound)
        }
    }

    #[derive(Default)]
    struct FakeStorage {
        objects: Mutex<HashMap<String, Bytes>>,
    }

    impl ObjectStoragePort for FakeStorage {
        fn bucket_name(&self) -> String {
            "coopdesk-media".to_string()
        }

        async fn put_object(
            &self,
            _bucket: &str,
            object_key: &str,
            payload: Bytes,
            _content_type: &str,
        ) -> Result<(), CoreError> {
            self.objects
                .lock()
                .unwrap()
                .insert(object_key.to_string(), payload);
            Ok(())
        }

        async fn presign_get_url(
            &self,
            bucket: &str,
            object_key: &str,
            expires_in: Duration,
        ) -> Result<PresignedUrl, CoreError> {
            Ok(PresignedUrl {
                url: format!("https://storage.test/{bucket}/{object_key}"),
                expires_in_seconds: expires_in.as_secs(),
            })
        }

        async fn delete_object(&self, _bucket: &str, object_key: &str) -> Result<(), CoreError> {
            self.objects.lock().unwrap().remove(object_key);
            Ok(())
        }
    }

    fn upload(name: &str, data: &'static [u8]) -> UploadMediaInput {
        UploadMediaInput {
            file_name: name.to_string(),
            mime_type: "image/png".to_string(),
            data: Bytes::from_static(data),
        }
    }

    #[tokio::test]
    async fn upload_stores_object_and_row() {
        let service = Service::new(InMemoryMediaRepository::default(), FakeStorage::default());
        let ctx = RequestContext::default();

        let media = service
            .upload_media(&ctx, upload("avatar one.png", b"hello"))
            .await
            .unwrap();

        assert_eq!(media.size_bytes, 5);
        assert_eq!(
            media.checksum_sha256,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert!(media.object_key.ends_with("/avatar%20one.png"));
        assert_eq!(media.bucket, "coopdesk-media");
        assert!(
            service
                .object_storage
                .objects
                .lock()
                .unwrap()
                .contains_key(&media.object_key)
        );
    }

    #[tokio::test]
    async fn empty_and_oversized_files_are_rejected() {
        let service = Service::new(InMemoryMediaRepository::default(), FakeStorage::default());
        let ctx = RequestContext::default();

        let empty = service.upload_media(&ctx, upload("a.png", b"")).await;
        assert!(matches!(empty, Err(CoreError::Invalid(_))));

        let oversized = UploadMediaInput {
            file_name: "big.bin".to_string(),
            mime_type: "application/octet-stream".to_string(),
            data: Bytes::from(vec![0u8; MAX_UPLOAD_BYTES + 1]),
        };
        let result = service.upload_media(&ctx, oversized).await;
        assert!(matches!(result, Err(CoreError::FileTooLarge)));
        assert!(service.object_storage.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_insert_removes_the_uploaded_object() {
        let repository = InMemoryMediaRepository {
            reject_inserts: true,
            ..Default::default()
        };
        let service = Service::new(repository, FakeStorage::default());
        let ctx = RequestContext::default();

        let result = service.upload_media(&ctx, upload("a.png", b"data")).await;

        assert!(matches!(result, Err(CoreError::Constraint { .. })));
        assert!(service.object_storage.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn download_url_uses_configured_ttl() {
        let service = Service::new(InMemoryMediaRepository::default(), FakeStorage::default())
            .with_presign_ttl(Duration::from_secs(60));
        let ctx = RequestContext::default();
        let media = service
            .upload_media(&ctx, upload("a.png", b"data"))
            .await
            .unwrap();

        let url = service.get_download_url(&ctx, media.id).await.unwrap();
        assert_eq!(url.expires_in_seconds, 60);
        assert!(url.url.contains(&media.object_key));
    }

    #[tokio::test]
    async fn delete_removes_object_then_row() {
        let service = Service::new(InMemoryMediaRepository::default(), FakeStorage::default());
        let ctx = RequestContext::default();
        let media = service
            .upload_media(&ctx, upload("a.png", b"data"))
            .await
            .unwrap();

        service.delete_media(&ctx, media.id).await.unwrap();

        assert!(service.object_storage.objects.lock().unwrap().is_empty());
        assert!(matches!(
            service.get_download_url(&ctx, media.id).await,
            Err(CoreError::NotFound)
        ));
    }
}
