use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Created,
    Updated,
    Deleted,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Created => "created",
            EventAction::Updated => "updated",
            EventAction::Deleted => "deleted",
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort notification of a successful write. Not a durability mechanism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DomainEvent {
    /// `<entity>.<action>`, e.g. `member.updated`.
    pub event_type: String,
    pub entity: String,
    pub entity_id: Uuid,
    pub action: EventAction,
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent {
    pub fn new(
        entity: &str,
        entity_id: Uuid,
        action: EventAction,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_type: format!("{entity}.{action}"),
            entity: entity.to_string(),
            entity_id,
            action,
            payload,
            occurred_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_joins_entity_and_action() {
        let event = DomainEvent::new(
            "member",
            Uuid::nil(),
            EventAction::Deleted,
            serde_json::Value::Null,
        );
        assert_eq!(event.event_type, "member.deleted");
        assert_eq!(event.action.as_str(), "deleted");
    }
}
