use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::class_year::CreateClassYearRequest;
use crate::error::{Result, StorageError};
use crate::models::ClassYear;

/// Repository for ClassYear database operations
pub struct ClassYearRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ClassYearRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all class years in display order
    pub async fn list(&self) -> Result<Vec<ClassYear>> {
        let class_years = sqlx::query_as::<_, ClassYear>(
            r#"
            SELECT class_year_id, grad_year, class_name, display_order
            FROM class_years
            ORDER BY display_order
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(class_years)
    }

    /// Get a class year by ID
    pub async fn find_by_id(&self, id: i64) -> Result<ClassYear> {
        let class_year = sqlx::query_as::<_, ClassYear>(
            r#"
            SELECT class_year_id, grad_year, class_name, display_order
            FROM class_years
            WHERE class_year_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(class_year)
    }

    /// Create a new class year
    pub async fn create(&self, req: &CreateClassYearRequest) -> Result<ClassYear> {
        req.validate()?;

        let class_year = sqlx::query_as::<_, ClassYear>(
            r#"
            INSERT INTO class_years (grad_year, class_name, display_order)
            VALUES (?, ?, ?)
            RETURNING class_year_id, grad_year, class_name, display_order
            "#,
        )
        .bind(req.grad_year)
        .bind(&req.class_name)
        .bind(req.display_order)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let e = StorageError::from(e);
            if e.is_unique_violation() {
                return StorageError::ConstraintViolation(
                    "Graduation year already exists".to_string(),
                );
            }
            e
        })?;

        Ok(class_year)
    }
}
