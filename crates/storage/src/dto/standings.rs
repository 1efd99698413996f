use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One team's aggregated totals plus its leaderboard position
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StandingRow {
    /// Leaderboard position, 1 = current leader.
    pub rank: i64,
    pub team_id: i64,
    pub team_name: String,
    pub color: Option<String>,
    pub total_points: i64,
    pub events_participated: i64,
    pub wins: i64,
    pub second_place: i64,
    pub third_place: i64,
    pub fourth_place: i64,
    /// Margin over the next-ranked team; `None` for the last row.
    pub points_ahead: Option<i64>,
}

/// One team's totals within a single event category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryBreakdownRow {
    pub team_id: i64,
    pub team_name: String,
    pub category: String,
    pub points: i64,
    pub event_count: i64,
    /// points / event_count, rounded to 2 decimal places.
    pub average_points: Decimal,
}

/// Mean finishing rank per team; lower is better
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AverageRankRow {
    pub team_id: i64,
    pub team_name: String,
    pub average_rank: Decimal,
    pub events_participated: i64,
}

/// Points-per-student efficiency metric per team
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamEfficiencyRow {
    pub team_id: i64,
    pub team_name: String,
    pub student_count: i64,
    pub total_points: i64,
    /// total_points / student_count, rounded to 2 decimal places; 0 for a
    /// team with no students.
    pub points_per_student: Decimal,
}
