use std::sync::LazyLock;

use sea_orm::{DatabaseConnection, DbErr, LoaderTrait};
use uuid::Uuid;

use crate::{
    domain::{
        branch::entities::Branch, media::entities::Media, member::entities::Member,
        query::value::DataType,
    },
    entity::{
        branches, media,
        members::{ActiveModel, Column, Entity, Model},
    },
    infrastructure::{query::field_map::FieldMap, repositories::crud_entity::CrudEntity},
};

pub const PRELOAD_BRANCH: &str = "branch";
pub const PRELOAD_PHOTO: &str = "photo";

static FIELDS: LazyLock<FieldMap<Entity>> = LazyLock::new(|| {
    FieldMap::new()
        .insert("id", Column::Id, DataType::Uuid)
        .insert("branch_id", Column::BranchId, DataType::Uuid)
        .insert("photo_id", Column::PhotoId, DataType::Uuid)
        .insert("first_name", Column::FirstName, DataType::Text)
        .insert("last_name", Column::LastName, DataType::Text)
        .insert("email", Column::Email, DataType::Text)
        .insert("status", Column::Status, DataType::Text)
        .insert("shares", Column::Shares, DataType::Number)
        .insert("balance", Column::Balance, DataType::Float)
        .insert("joined_on", Column::JoinedOn, DataType::Date)
        .insert("created_at", Column::CreatedAt, DataType::DateTime)
        .insert("updated_at", Column::UpdatedAt, DataType::DateTime)
});

impl CrudEntity for Entity {
    type Domain = Member;

    const RESOURCE: &'static str = "member";
    const PRELOADS: &'static [&'static str] = &[PRELOAD_BRANCH, PRELOAD_PHOTO];

    fn field_map() -> &'static FieldMap<Self> {
        &FIELDS
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn domain_id(member: &Member) -> Uuid {
        member.id
    }

    fn into_domain(model: Model) -> Member {
        Member::from(model)
    }

    fn into_active_model(member: &Member) -> ActiveModel {
        ActiveModel::from(member)
    }

    async fn attach_preloads(
        db: &DatabaseConnection,
        models: Vec<Model>,
        preloads: &[String],
    ) -> Result<Vec<Member>, DbErr> {
        let wants = |name: &str| preloads.iter().any(|preload| preload == name);

        // One query per relation, whatever the page size.
        let branches = if wants(PRELOAD_BRANCH) {
            models.load_one(branches::Entity, db).await?
        } else {
            vec![None; models.len()]
        };
        let photos = if wants(PRELOAD_PHOTO) {
            models.load_one(media::Entity, db).await?
        } else {
            vec![None; models.len()]
        };

        Ok(models
            .into_iter()
            .zip(branches)
            .zip(photos)
            .map(|((model, branch), photo)| {
                let mut member = Member::from(model);
                member.branch = branch.map(Branch::from);
                member.photo = photo.map(Media::from);
                member
            })
            .collect())
    }
}
