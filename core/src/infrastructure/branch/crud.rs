use std::sync::LazyLock;

use uuid::Uuid;

use crate::{
    domain::{branch::entities::Branch, query::value::DataType},
    entity::branches::{ActiveModel, Column, Entity, Model},
    infrastructure::{query::field_map::FieldMap, repositories::crud_entity::CrudEntity},
};

static FIELDS: LazyLock<FieldMap<Entity>> = LazyLock::new(|| {
    FieldMap::new()
        .insert("id", Column::Id, DataType::Uuid)
        .insert("name", Column::Name, DataType::Text)
        .insert("code", Column::Code, DataType::Text)
        .insert("city", Column::City, DataType::Text)
        .insert("is_active", Column::IsActive, DataType::Boolean)
        .insert("opened_on", Column::OpenedOn, DataType::Date)
        .insert("created_at", Column::CreatedAt, DataType::DateTime)
        .insert("updated_at", Column::UpdatedAt, DataType::DateTime)
});

impl CrudEntity for Entity {
    type Domain = Branch;

    const RESOURCE: &'static str = "branch";

    fn field_map() -> &'static FieldMap<Self> {
        &FIELDS
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn domain_id(branch: &Branch) -> Uuid {
        branch.id
    }

    fn into_domain(model: Model) -> Branch {
        Branch::from(model)
    }

    fn into_active_model(branch: &Branch) -> ActiveModel {
        ActiveModel::from(branch)
    }
}
