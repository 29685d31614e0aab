use sea_orm::ActiveValue::Set;

use crate::{domain::branch::entities::Branch, entity::branches};

impl From<&branches::Model> for Branch {
    fn from(model: &branches::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            code: model.code.clone(),
            city: model.city.clone(),
            is_active: model.is_active,
            opened_on: model.opened_on,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<branches::Model> for Branch {
    fn from(model: branches::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&Branch> for branches::ActiveModel {
    fn from(branch: &Branch) -> Self {
        Self {
            id: Set(branch.id),
            name: Set(branch.name.clone()),
            code: Set(branch.code.clone()),
            city: Set(branch.city.clone()),
            is_active: Set(branch.is_active),
            opened_on: Set(branch.opened_on),
            created_at: Set(branch.created_at.fixed_offset()),
            updated_at: Set(branch.updated_at.fixed_offset()),
        }
    }
}
