use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{common::generate_uuid_v7, events::entities::DomainEvent};

/// Audit trail entry: one per recorded write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Footstep {
    pub id: Uuid,
    pub resource: String,
    pub resource_id: Uuid,
    pub action: String,
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainEvent> for Footstep {
    fn from(event: &DomainEvent) -> Self {
        Self {
            id: generate_uuid_v7(),
            resource: event.entity.clone(),
            resource_id: event.entity_id,
            action: event.action.to_string(),
            payload: event.payload.clone(),
            created_at: event.occurred_at,
        }
    }
}
