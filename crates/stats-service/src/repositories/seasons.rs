//! Seasons repository for database operations.

use crate::errors::StatsError;
use crate::models::SeasonRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

const SEASON_COLUMNS: &str = "season_id, year, created_at, updated_at";

/// Seasons repository for database operations.
pub struct SeasonsRepository;

impl SeasonsRepository {
    /// Create a season. Duplicate years map to 409 Conflict.
    #[instrument(skip(pool), name = "stats.repo.create_season")]
    pub async fn create(pool: &PgPool, year: i32) -> Result<SeasonRow, StatsError> {
        let row = sqlx::query(&format!(
            "INSERT INTO seasons (year) VALUES ($1) RETURNING {SEASON_COLUMNS}",
        ))
        .bind(year)
        .fetch_one(pool)
        .await?;

        Ok(map_row_to_season(row))
    }

    /// List all seasons, most recent first.
    #[instrument(skip_all, name = "stats.repo.list_seasons")]
    pub async fn list(pool: &PgPool) -> Result<Vec<SeasonRow>, StatsError> {
        let rows = sqlx::query(&format!(
            "SELECT {SEASON_COLUMNS} FROM seasons ORDER BY year DESC",
        ))
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(map_row_to_season).collect())
    }

    /// Delete a season. Fails with 409 Conflict when statistics reference it.
    #[instrument(skip(pool), name = "stats.repo.delete_season")]
    pub async fn delete(pool: &PgPool, season_id: i64) -> Result<(), StatsError> {
        let result = sqlx::query("DELETE FROM seasons WHERE season_id = $1")
            .bind(season_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StatsError::NotFound("Season not found".to_string()));
        }

        Ok(())
    }
}

/// Map a database row to a SeasonRow struct.
pub fn map_row_to_season(row: sqlx::postgres::PgRow) -> SeasonRow {
    SeasonRow {
        season_id: row.get("season_id"),
        year: row.get("year"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
