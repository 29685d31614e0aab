use sea_orm::ActiveValue::Set;

use crate::{domain::media::entities::Media, entity::media};

impl From<&media::Model> for Media {
    fn from(model: &media::Model) -> Self {
        Self {
            id: model.id,
            file_name: model.file_name.clone(),
            bucket: model.bucket.clone(),
            object_key: model.object_key.clone(),
            mime_type: model.mime_type.clone(),
            size_bytes: model.size_bytes,
            checksum_sha256: model.checksum_sha256.clone(),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<media::Model> for Media {
    fn from(model: media::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&Media> for media::ActiveModel {
    fn from(media: &Media) -> Self {
        Self {
            id: Set(media.id),
            file_name: Set(media.file_name.clone()),
            bucket: Set(media.bucket.clone()),
            object_key: Set(media.object_key.clone()),
            mime_type: Set(media.mime_type.clone()),
            size_bytes: Set(media.size_bytes),
            checksum_sha256: Set(media.checksum_sha256.clone()),
            created_at: Set(media.created_at.fixed_offset()),
            updated_at: Set(media.updated_at.fixed_offset()),
        }
    }
}
