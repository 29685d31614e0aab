use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct CreateBranchInput {
    pub name: String,
    pub code: String,
    pub city: Option<String>,
    pub is_active: Option<bool>,
    pub opened_on: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBranchInput {
    pub name: Option<String>,
    pub code: Option<String>,
    pub city: Option<String>,
    pub is_active: Option<bool>,
    pub opened_on: Option<NaiveDate>,
}
