use std::sync::LazyLock;

use uuid::Uuid;

use crate::{
    domain::{footstep::entities::Footstep, query::value::DataType},
    entity::footsteps::{ActiveModel, Column, Entity, Model},
    infrastructure::{query::field_map::FieldMap, repositories::crud_entity::CrudEntity},
};

static FIELDS: LazyLock<FieldMap<Entity>> = LazyLock::new(|| {
    FieldMap::new()
        .insert("id", Column::Id, DataType::Uuid)
        .insert("resource", Column::Resource, DataType::Text)
        .insert("resource_id", Column::ResourceId, DataType::Uuid)
        .insert("action", Column::Action, DataType::Text)
        .insert("created_at", Column::CreatedAt, DataType::DateTime)
});

impl CrudEntity for Entity {
    type Domain = Footstep;

    const RESOURCE: &'static str = "footstep";
    // Footsteps are written by an event listener; publishing them would feed it back to itself.
    const PUBLISHES_EVENTS: bool = false;

    fn field_map() -> &'static FieldMap<Self> {
        &FIELDS
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn default_sort() -> (&'static str, Column) {
        ("created_at", Column::CreatedAt)
    }

    fn domain_id(footstep: &Footstep) -> Uuid {
        footstep.id
    }

    fn into_domain(model: Model) -> Footstep {
        Footstep::from(model)
    }

    fn into_active_model(footstep: &Footstep) -> ActiveModel {
        ActiveModel::from(footstep)
    }
}
