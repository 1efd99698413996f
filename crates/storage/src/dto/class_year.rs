use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating a new class year
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateClassYearRequest {
    pub grad_year: i64,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Class name must be between 1 and 255 characters"
    ))]
    pub class_name: String,

    /// Grouping order for roster views; not derived from grad_year.
    pub display_order: i64,
}
