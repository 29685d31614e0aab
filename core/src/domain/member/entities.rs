use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    branch::entities::Branch,
    common::generate_timestamp,
    media::entities::Media,
    member::value_objects::{CreateMemberInput, UpdateMemberInput},
};

pub const MEMBER_STATUSES: [&str; 3] = ["active", "inactive", "suspended"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub photo_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
    pub shares: i64,
    pub balance: f64,
    pub joined_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Present only when the `branch` preload was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Branch>,
    /// Present only when the `photo` preload was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Media>,
}

impl Member {
    pub fn new(input: CreateMemberInput) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            branch_id: input.branch_id,
            photo_id: input.photo_id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email.to_lowercase(),
            status: input.status.unwrap_or_else(|| MEMBER_STATUSES[0].to_string()),
            shares: input.shares.unwrap_or(0),
            balance: input.balance.unwrap_or(0.0),
            joined_on: input.joined_on.unwrap_or_else(|| now.date_naive()),
            created_at: now,
            updated_at: now,
            branch: None,
            photo: None,
        }
    }

    pub fn apply(mut self, input: UpdateMemberInput) -> Self {
        if let Some(branch_id) = input.branch_id {
            self.branch_id = branch_id;
            self.branch = None;
        }
        if let Some(photo_id) = input.photo_id {
            self.photo_id = Some(photo_id);
            self.photo = None;
        }
        if let Some(first_name) = input.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = input.email {
            self.email = email.to_lowercase();
        }
        if let Some(status) = input.status {
            self.status = status;
        }
        if let Some(shares) = input.shares {
            self.shares = shares;
        }
        if let Some(balance) = input.balance {
            self.balance = balance;
        }
        if let Some(joined_on) = input.joined_on {
            self.joined_on = joined_on;
        }
        self.updated_at = Utc::now();
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CreateMemberInput {
        CreateMemberInput {
            branch_id: Uuid::new_v4(),
            photo_id: None,
            first_name: "Ada".to_string(),
            last_name: "Obi".to_string(),
            email: "Ada.Obi@Example.org".to_string(),
            status: None,
            shares: None,
            balance: None,
            joined_on: None,
        }
    }

    #[test]
    fn new_member_gets_defaults() {
        let member = Member::new(input());
        assert_eq!(member.status, "active");
        assert_eq!(member.shares, 0);
        assert_eq!(member.email, "ada.obi@example.org");
        assert_eq!(member.full_name(), "Ada Obi");
    }

    #[test]
    fn apply_only_touches_given_fields() {
        let member = Member::new(input());
        let before = member.clone();
        let updated = member.apply(UpdateMemberInput {
            status: Some("suspended".to_string()),
            ..Default::default()
        });

        assert_eq!(updated.status, "suspended");
        assert_eq!(updated.first_name, before.first_name);
        assert_eq!(updated.id, before.id);
        assert!(updated.updated_at >= before.updated_at);
    }
}
