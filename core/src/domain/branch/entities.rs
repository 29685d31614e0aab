use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    branch::value_objects::{CreateBranchInput, UpdateBranchInput},
    common::generate_timestamp,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Branch {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub city: Option<String>,
    pub is_active: bool,
    pub opened_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Branch {
    pub fn new(input: CreateBranchInput) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            name: input.name,
            code: input.code,
            city: input.city,
            is_active: input.is_active.unwrap_or(true),
            opened_on: input.opened_on,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(mut self, input: UpdateBranchInput) -> Self {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(code) = input.code {
            self.code = code;
        }
        if let Some(city) = input.city {
            self.city = Some(city);
        }
        if let Some(is_active) = input.is_active {
            self.is_active = is_active;
        }
        if let Some(opened_on) = input.opened_on {
            self.opened_on = opened_on;
        }
        self.updated_at = Utc::now();
        self
    }
}
