use std::time::Duration;

use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    presigning::PresigningConfig,
    primitives::ByteStream,
};
use bytes::Bytes;
use tracing::instrument;

use crate::domain::{
    common::{ObjectStorageConfig, entities::app_errors::CoreError},
    media::{entities::PresignedUrl, ports::ObjectStoragePort},
};

/// S3-compatible storage (AWS, MinIO, Garage). Path-style addressing so any endpoint works.
#[derive(Clone)]
pub struct S3ObjectStorage {
    client: Client,
    bucket: String,
}

impl S3ObjectStorage {
    pub fn new(config: &ObjectStorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "coopdesk",
        );

        let endpoint = config.endpoint.trim_end_matches('/');

        tracing::info!(
            endpoint = %endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing object storage client"
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }
}

fn storage_error(action: &str, err: impl std::fmt::Display) -> CoreError {
    CoreError::ObjectStorageError(format!("Failed to {action}: {err}"))
}

impl ObjectStoragePort for S3ObjectStorage {
    fn bucket_name(&self) -> String {
        self.bucket.clone()
    }

    #[instrument(skip(self, payload), fields(size = payload.len()))]
    async fn put_object(
        &self,
        bucket: &str,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<(), CoreError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(object_key)
            .content_type(content_type)
            .body(ByteStream::from(payload))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, bucket = %bucket, object_key = %object_key, "Failed to upload object");
                storage_error("upload object", e)
            })?;

        tracing::info!(bucket = %bucket, object_key = %object_key, "Object uploaded");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn presign_get_url(
        &self,
        bucket: &str,
        object_key: &str,
        expires_in: Duration,
    ) -> Result<PresignedUrl, CoreError> {
        let presigning_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| storage_error("build presigning config", e))?;

        let presigned_request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(object_key)
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, bucket = %bucket, object_key = %object_key, "Failed to presign download");
                storage_error("presign download", e)
            })?;

        Ok(PresignedUrl {
            url: presigned_request.uri().to_string(),
            expires_in_seconds: expires_in.as_secs(),
        })
    }

    #[instrument(skip(self))]
    async fn delete_object(&self, bucket: &str, object_key: &str) -> Result<(), CoreError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(object_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, bucket = %bucket, object_key = %object_key, "Failed to delete object");
                storage_error("delete object", e)
            })?;

        tracing::info!(bucket = %bucket, object_key = %object_key, "Object deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ObjectStorageConfig {
        ObjectStorageConfig {
            endpoint: "http://localhost:9000/".to_string(),
            region: "us-east-1".to_string(),
            access_key: "minio".to_string(),
            secret_key: "minio-secret".to_string(),
            bucket: "coopdesk-media".to_string(),
            presign_ttl_secs: 300,
        }
    }

    #[tokio::test]
    async fn presigned_download_is_signed_locally() {
        let storage = S3ObjectStorage::new(&config());

        let url = storage
            .presign_get_url(
                &storage.bucket_name(),
                "0190/abc/avatar.png",
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        assert_eq!(url.expires_in_seconds, 60);
        assert!(url.url.starts_with("http://localhost:9000/coopdesk-media/0190/abc/avatar.png?"));
        assert!(url.url.contains("X-Amz-Expires=60"));
    }
}
