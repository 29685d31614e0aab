use sea_orm::ActiveValue::Set;

use crate::{domain::member::entities::Member, entity::members};

impl From<&members::Model> for Member {
    fn from(model: &members::Model) -> Self {
        Self {
            id: model.id,
            branch_id: model.branch_id,
            photo_id: model.photo_id,
            first_name: model.first_name.clone(),
            last_name: model.last_name.clone(),
            email: model.email.clone(),
            status: model.status.clone(),
            shares: model.shares,
            balance: model.balance,
            joined_on: model.joined_on,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
            // Relations are attached by the repository when preloaded.
            branch: None,
            photo: None,
        }
    }
}

impl From<members::Model> for Member {
    fn from(model: members::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&Member> for members::ActiveModel {
    fn from(member: &Member) -> Self {
        Self {
            id: Set(member.id),
            branch_id: Set(member.branch_id),
            photo_id: Set(member.photo_id),
            first_name: Set(member.first_name.clone()),
            last_name: Set(member.last_name.clone()),
            email: Set(member.email.clone()),
            status: Set(member.status.clone()),
            shares: Set(member.shares),
            balance: Set(member.balance),
            joined_on: Set(member.joined_on),
            created_at: Set(member.created_at.fixed_offset()),
            updated_at: Set(member.updated_at.fixed_offset()),
        }
    }
}
