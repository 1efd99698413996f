use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for adding a student to the roster
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateStudentRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "First name must be between 1 and 255 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Last name must be between 1 and 255 characters"
    ))]
    pub last_name: String,

    #[validate(email)]
    pub email: Option<String>,

    pub team_id: i64,

    pub class_year_id: i64,
}

/// Roster row joined with team and class year reference data
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentRosterEntry {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub team_id: i64,
    pub team_name: String,
    pub color: Option<String>,
    pub class_name: String,
    pub display_order: i64,
}

/// Student row joined with their team's current leaderboard position
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentStandingRow {
    pub team_rank: i64,
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub team_name: String,
    pub color: Option<String>,
    pub class_name: String,
    pub team_total_points: i64,
}
