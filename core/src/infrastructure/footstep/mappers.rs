use sea_orm::ActiveValue::Set;

use crate::{domain::footstep::entities::Footstep, entity::footsteps};

impl From<footsteps::Model> for Footstep {
    fn from(model: footsteps::Model) -> Self {
        Self {
            id: model.id,
            resource: model.resource,
            resource_id: model.resource_id,
            action: model.action,
            payload: model.payload,
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<&Footstep> for footsteps::ActiveModel {
    fn from(footstep: &Footstep) -> Self {
        Self {
            id: Set(footstep.id),
            resource: Set(footstep.resource.clone()),
            resource_id: Set(footstep.resource_id),
            action: Set(footstep.action.clone()),
            payload: Set(footstep.payload.clone()),
            created_at: Set(footstep.created_at.fixed_offset()),
        }
    }
}
