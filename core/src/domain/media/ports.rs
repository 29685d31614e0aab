use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use uuid::Uuid;

use crate::domain::{
    common::{context::RequestContext, entities::app_errors::CoreError},
    media::{
        entities::{Media, PresignedUrl},
        value_objects::UploadMediaInput,
    },
};

/// Port for object storage operations (S3 compatible)
#[cfg_attr(test, mockall::automock)]
pub trait ObjectStoragePort: Send + Sync {
    /// Bucket every media object is written to
    fn bucket_name(&self) -> String;

    fn put_object(
        &self,
        bucket: &str,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn presign_get_url(
        &self,
        bucket: &str,
        object_key: &str,
        expires_in: Duration,
    ) -> impl Future<Output = Result<PresignedUrl, CoreError>> + Send;

    fn delete_object(
        &self,
        bucket: &str,
        object_key: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait MediaService: Send + Sync {
    /// Stores the binary, then records its metadata row.
    fn upload_media(
        &self,
        ctx: &RequestContext,
        input: UploadMediaInput,
    ) -> impl Future<Output = Result<Media, CoreError>> + Send;

    fn get_download_url(
        &self,
        ctx: &RequestContext,
        media_id: Uuid,
    ) -> impl Future<Output = Result<PresignedUrl, CoreError>> + Send;

    /// Removes the binary, then the metadata row.
    fn delete_media(
        &self,
        ctx: &RequestContext,
        media_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
