use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassYear {
    pub class_year_id: i64,
    pub grad_year: i64,
    pub class_name: String,
    /// Grouping order for roster views; set independently of grad_year.
    pub display_order: i64,
}
