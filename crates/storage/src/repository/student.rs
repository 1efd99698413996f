use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::student::{CreateStudentRequest, StudentRosterEntry};
use crate::error::{Result, StorageError};
use crate::models::Student;

/// Repository for Student database operations. Students are roster context
/// only; they never feed point totals.
pub struct StudentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StudentRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a student to the roster.
    ///
    /// The referenced team and class year are checked before the insert, so
    /// a dangling reference fails with `NotFound` and writes nothing.
    /// Duplicate submissions create duplicate students; there is no
    /// dedup key.
    pub async fn create(&self, req: &CreateStudentRequest) -> Result<Student> {
        req.validate()?;

        sqlx::query_scalar::<_, i64>("SELECT team_id FROM teams WHERE team_id = ?")
            .bind(req.team_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        sqlx::query_scalar::<_, i64>(
            "SELECT class_year_id FROM class_years WHERE class_year_id = ?",
        )
        .bind(req.class_year_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (first_name, last_name, email, team_id, class_year_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING student_id, first_name, last_name, email, team_id, class_year_id
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(req.team_id)
        .bind(req.class_year_id)
        .fetch_one(self.pool)
        .await?;

        tracing::info!(
            student_id = student.student_id,
            team_id = student.team_id,
            "added student to roster"
        );

        Ok(student)
    }

    /// List all students
    pub async fn list(&self) -> Result<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT student_id, first_name, last_name, email, team_id, class_year_id
            FROM students
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(students)
    }

    /// Get a student by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Student> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT student_id, first_name, last_name, email, team_id, class_year_id
            FROM students
            WHERE student_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(student)
    }

    /// Search students by name or email fragment
    pub async fn search(&self, query: &str) -> Result<Vec<Student>> {
        let pattern = format!("%{query}%");

        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT student_id, first_name, last_name, email, team_id, class_year_id
            FROM students
            WHERE first_name LIKE ?1
               OR last_name LIKE ?1
               OR email LIKE ?1
            ORDER BY last_name, first_name
            "#,
        )
        .bind(&pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(students)
    }

    /// Full roster joined with team and class year reference data
    pub async fn list_roster(&self) -> Result<Vec<StudentRosterEntry>> {
        let roster = sqlx::query_as::<_, StudentRosterEntry>(
            r#"
            SELECT
                s.student_id,
                s.first_name,
                s.last_name,
                s.email,
                s.team_id,
                t.team_name,
                t.color,
                cy.class_name,
                cy.display_order
            FROM students s
            JOIN teams t ON s.team_id = t.team_id
            JOIN class_years cy ON s.class_year_id = cy.class_year_id
            ORDER BY t.team_name, cy.display_order, s.last_name, s.first_name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(roster)
    }

    /// Student count per team; teams with no students have no entry
    pub async fn count_by_team(&self) -> Result<Vec<(i64, i64)>> {
        let counts = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT team_id, COUNT(*)
            FROM students
            GROUP BY team_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util;

    fn request(first: &str, last: &str, team_id: i64, class_year_id: i64) -> CreateStudentRequest {
        CreateStudentRequest {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: Some(format!(
                "{}.{}@school.edu",
                first.to_lowercase(),
                last.to_lowercase()
            )),
            team_id,
            class_year_id,
        }
    }

    #[tokio::test]
    async fn test_create_student() {
        let db = test_util::memory_db().await;
        let team_ids = test_util::seed_teams(&db).await;
        let class_year_id = test_util::seed_class_year(&db).await;

        let student = StudentRepository::new(db.pool())
            .create(&request("Maya", "Lin", team_ids[0], class_year_id))
            .await
            .unwrap();

        assert_eq!(student.first_name, "Maya");
        assert_eq!(student.team_id, team_ids[0]);
    }

    #[tokio::test]
    async fn test_unknown_team_is_not_found_and_writes_nothing() {
        let db = test_util::memory_db().await;
        test_util::seed_teams(&db).await;
        let class_year_id = test_util::seed_class_year(&db).await;
        let repo = StudentRepository::new(db.pool());

        let err = repo
            .create(&request("Maya", "Lin", 999, class_year_id))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::NotFound), "{err}");
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_class_year_is_not_found() {
        let db = test_util::memory_db().await;
        let team_ids = test_util::seed_teams(&db).await;
        let repo = StudentRepository::new(db.pool());

        let err = repo
            .create(&request("Maya", "Lin", team_ids[0], 999))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::NotFound), "{err}");
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let db = test_util::memory_db().await;
        let team_ids = test_util::seed_teams(&db).await;
        let class_year_id = test_util::seed_class_year(&db).await;

        let mut req = request("Maya", "Lin", team_ids[0], class_year_id);
        req.email = Some("not-an-email".to_string());

        let err = StudentRepository::new(db.pool())
            .create(&req)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)), "{err}");
    }

    #[tokio::test]
    async fn test_duplicate_submission_creates_duplicate_students() {
        let db = test_util::memory_db().await;
        let team_ids = test_util::seed_teams(&db).await;
        let class_year_id = test_util::seed_class_year(&db).await;
        let repo = StudentRepository::new(db.pool());

        let req = request("Maya", "Lin", team_ids[0], class_year_id);
        let first = repo.create(&req).await.unwrap();
        let second = repo.create(&req).await.unwrap();

        assert_ne!(first.student_id, second.student_id);
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_matches_name_and_email() {
        let db = test_util::memory_db().await;
        let team_ids = test_util::seed_teams(&db).await;
        let class_year_id = test_util::seed_class_year(&db).await;
        let repo = StudentRepository::new(db.pool());

        repo.create(&request("Maya", "Lin", team_ids[0], class_year_id))
            .await
            .unwrap();
        repo.create(&request("Omar", "Haddad", team_ids[1], class_year_id))
            .await
            .unwrap();

        let by_last = repo.search("Lin").await.unwrap();
        assert_eq!(by_last.len(), 1);
        assert_eq!(by_last[0].first_name, "Maya");

        let by_email = repo.search("haddad@school").await.unwrap();
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].first_name, "Omar");

        assert!(repo.search("Nobody").await.unwrap().is_empty());
    }
}
