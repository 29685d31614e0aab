use chrono::NaiveDate;
use coopdesk_core::domain::member::{
    entities::MEMBER_STATUSES,
    value_objects::{CreateMemberInput, UpdateMemberInput},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if MEMBER_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(ValidationError::new("status")
            .with_message("status must be one of active, inactive, suspended".into()))
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMemberValidator {
    pub branch_id: Uuid,

    #[serde(default)]
    pub photo_id: Option<Uuid>,

    #[validate(length(min = 1, max = 80, message = "first_name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 80, message = "last_name is required"))]
    pub last_name: String,

    #[validate(email(message = "email is invalid"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "shares cannot be negative"))]
    pub shares: Option<i64>,

    #[serde(default)]
    pub balance: Option<f64>,

    #[serde(default)]
    pub joined_on: Option<NaiveDate>,
}

impl From<CreateMemberValidator> for CreateMemberInput {
    fn from(payload: CreateMemberValidator) -> Self {
        Self {
            branch_id: payload.branch_id,
            photo_id: payload.photo_id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            status: payload.status,
            shares: payload.shares,
            balance: payload.balance,
            joined_on: payload.joined_on,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMemberValidator {
    #[serde(default)]
    pub branch_id: Option<Uuid>,

    #[serde(default)]
    pub photo_id: Option<Uuid>,

    #[serde(default)]
    #[validate(length(min = 1, max = 80, message = "first_name cannot be empty"))]
    pub first_name: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 80, message = "last_name cannot be empty"))]
    pub last_name: Option<String>,

    #[serde(default)]
    #[validate(email(message = "email is invalid"))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "shares cannot be negative"))]
    pub shares: Option<i64>,

    #[serde(default)]
    pub balance: Option<f64>,

    #[serde(default)]
    pub joined_on: Option<NaiveDate>,
}

impl From<UpdateMemberValidator> for UpdateMemberInput {
    fn from(payload: UpdateMemberValidator) -> Self {
        Self {
            branch_id: payload.branch_id,
            photo_id: payload.photo_id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            status: payload.status,
            shares: payload.shares,
            balance: payload.balance,
            joined_on: payload.joined_on,
        }
    }
}
