use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: i64,
    pub event_date: chrono::NaiveDate,
    pub description: String,
    /// Opaque grouping key ("sports", "academic", ...); never validated
    /// against a fixed set.
    pub category: String,
    pub created_at: chrono::NaiveDateTime,
}
