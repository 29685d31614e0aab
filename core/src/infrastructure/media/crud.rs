use std::sync::LazyLock;

use uuid::Uuid;

use crate::{
    domain::{media::entities::Media, query::value::DataType},
    entity::media::{ActiveModel, Column, Entity, Model},
    infrastructure::{query::field_map::FieldMap, repositories::crud_entity::CrudEntity},
};

static FIELDS: LazyLock<FieldMap<Entity>> = LazyLock::new(|| {
    FieldMap::new()
        .insert("id", Column::Id, DataType::Uuid)
        .insert("file_name", Column::FileName, DataType::Text)
        .insert("mime_type", Column::MimeType, DataType::Text)
        .insert("size_bytes", Column::SizeBytes, DataType::Number)
        .insert("checksum_sha256", Column::ChecksumSha256, DataType::Text)
        .insert("created_at", Column::CreatedAt, DataType::DateTime)
        .insert("updated_at", Column::UpdatedAt, DataType::DateTime)
});

impl CrudEntity for Entity {
    type Domain = Media;

    const RESOURCE: &'static str = "media";

    fn field_map() -> &'static FieldMap<Self> {
        &FIELDS
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn domain_id(media: &Media) -> Uuid {
        media.id
    }

    fn into_domain(model: Model) -> Media {
        Media::from(model)
    }

    fn into_active_model(media: &Media) -> ActiveModel {
        ActiveModel::from(media)
    }
}
