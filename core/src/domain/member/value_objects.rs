use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateMemberInput {
    pub branch_id: Uuid,
    pub photo_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: Option<String>,
    pub shares: Option<i64>,
    pub balance: Option<f64>,
    pub joined_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateMemberInput {
    pub branch_id: Option<Uuid>,
    pub photo_id: Option<Uuid>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub shares: Option<i64>,
    pub balance: Option<f64>,
    pub joined_on: Option<NaiveDate>,
}
