use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One team's result in one event. A team that did not participate has no
/// row at all; a zero-points row still counts as participation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventResult {
    pub event_id: i64,
    pub team_id: i64,
    pub points_earned: i64,
    pub rank: i64,
}
