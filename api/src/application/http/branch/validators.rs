use chrono::NaiveDate;
use coopdesk_core::domain::branch::value_objects::{CreateBranchInput, UpdateBranchInput};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBranchValidator {
    #[validate(length(min = 1, max = 120, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 32, message = "code must be 1 to 32 characters"))]
    pub code: String,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub is_active: Option<bool>,

    pub opened_on: NaiveDate,
}

impl From<CreateBranchValidator> for CreateBranchInput {
    fn from(payload: CreateBranchValidator) -> Self {
        Self {
            name: payload.name,
            code: payload.code,
            city: payload.city,
            is_active: payload.is_active,
            opened_on: payload.opened_on,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateBranchValidator {
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "name cannot be empty"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 32, message = "code must be 1 to 32 characters"))]
    pub code: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde(default)]
    pub opened_on: Option<NaiveDate>,
}

impl From<UpdateBranchValidator> for UpdateBranchInput {
    fn from(payload: UpdateBranchValidator) -> Self {
        Self {
            name: payload.name,
            code: payload.code,
            city: payload.city,
            is_active: payload.is_active,
            opened_on: payload.opened_on,
        }
    }
}
