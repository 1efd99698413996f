use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub team_id: i64,
    pub class_year_id: i64,
}
