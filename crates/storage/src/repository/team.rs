use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::team::CreateTeamRequest;
use crate::error::{Result, StorageError};
use crate::models::Team;

/// Repository for Team database operations. Teams are reference data:
/// created once, never deleted while students or event results point at
/// them.
pub struct TeamRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all teams in creation order
    pub async fn list(&self) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, team_name, color
            FROM teams
            ORDER BY team_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }

    /// Get a team by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, team_name, color
            FROM teams
            WHERE team_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(team)
    }

    /// Get a team by display name
    pub async fn find_by_name(&self, name: &str) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, team_name, color
            FROM teams
            WHERE team_name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(team)
    }

    /// Create a new team
    pub async fn create(&self, req: &CreateTeamRequest) -> Result<Team> {
        req.validate()?;

        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (team_name, color)
            VALUES (?, ?)
            RETURNING team_id, team_name, color
            "#,
        )
        .bind(&req.team_name)
        .bind(&req.color)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let e = StorageError::from(e);
            if e.is_unique_violation() {
                return StorageError::ConstraintViolation("Team name already exists".to_string());
            }
            e
        })?;

        Ok(team)
    }

    /// Delete a team by ID. Fails while the team is referenced by students
    /// or event results.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM teams
            WHERE team_id = ?
            "#,
        )
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            let e = StorageError::from(e);
            if e.is_foreign_key_violation() {
                return StorageError::ConstraintViolation(
                    "Team is still referenced by students or event results".to_string(),
                );
            }
            e
        })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = test_util::memory_db().await;
        let repo = TeamRepository::new(db.pool());

        let created = repo
            .create(&CreateTeamRequest {
                team_name: "Athena".to_string(),
                color: Some("blue".to_string()),
            })
            .await
            .unwrap();

        let by_id = repo.find_by_id(created.team_id).await.unwrap();
        assert_eq!(by_id.team_name, "Athena");
        let by_name = repo.find_by_name("Athena").await.unwrap();
        assert_eq!(by_name.team_id, created.team_id);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_constraint_violation() {
        let db = test_util::memory_db().await;
        let repo = TeamRepository::new(db.pool());

        let req = CreateTeamRequest {
            team_name: "Apollo".to_string(),
            color: None,
        };
        repo.create(&req).await.unwrap();
        let err = repo.create(&req).await.unwrap_err();
        assert!(matches!(err, StorageError::ConstraintViolation(_)), "{err}");
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let db = test_util::memory_db().await;
        let repo = TeamRepository::new(db.pool());

        let err = repo
            .create(&CreateTeamRequest {
                team_name: String::new(),
                color: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)), "{err}");
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let db = test_util::memory_db().await;
        let repo = TeamRepository::new(db.pool());

        let err = repo.delete(42).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound), "{err}");
    }
}
