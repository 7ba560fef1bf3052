//! Grades repository for database operations.

use crate::errors::StatsError;
use crate::models::GradeRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

const GRADE_COLUMNS: &str = "grade_id, name, is_senior, created_at, updated_at";

/// Grades repository for database operations.
pub struct GradesRepository;

impl GradesRepository {
    /// Create a grade.
    #[instrument(skip(pool), name = "stats.repo.create_grade")]
    pub async fn create(pool: &PgPool, name: &str, is_senior: bool) -> Result<GradeRow, StatsError> {
        let row = sqlx::query(&format!(
            "INSERT INTO grades (name, is_senior) VALUES ($1, $2) RETURNING {GRADE_COLUMNS}",
        ))
        .bind(name) // $1
        .bind(is_senior) // $2
        .fetch_one(pool)
        .await?;

        Ok(map_row_to_grade(row))
    }

    /// List all grades, senior grades first, then by name.
    #[instrument(skip_all, name = "stats.repo.list_grades")]
    pub async fn list(pool: &PgPool) -> Result<Vec<GradeRow>, StatsError> {
        let rows = sqlx::query(&format!(
            "SELECT {GRADE_COLUMNS} FROM grades ORDER BY is_senior DESC, name",
        ))
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(map_row_to_grade).collect())
    }

    /// Delete a grade. Fails with 409 Conflict when statistics reference it.
    #[instrument(skip(pool), name = "stats.repo.delete_grade")]
    pub async fn delete(pool: &PgPool, grade_id: i64) -> Result<(), StatsError> {
        let result = sqlx::query("DELETE FROM grades WHERE grade_id = $1")
            .bind(grade_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StatsError::NotFound("Grade not found".to_string()));
        }

        Ok(())
    }
}

/// Map a database row to a GradeRow struct.
pub fn map_row_to_grade(row: sqlx::postgres::PgRow) -> GradeRow {
    GradeRow {
        grade_id: row.get("grade_id"),
        name: row.get("name"),
        is_senior: row.get("is_senior"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
