//! Milestones repository: hundreds and five-wicket innings.
//!
//! Milestones hang off a statistic row and cascade with it. Career pages
//! need them joined back to seasons and grades, so the player-scoped
//! listings return the season year and grade name alongside each row.
//! Like the rest of the published record, the listings cover senior
//! grades only.

use crate::errors::StatsError;
use crate::models::{FiveWicketInningRow, HundredRow};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

const HUNDRED_COLUMNS: &str =
    "hundred_id, statistic_id, runs, is_not_out, is_in_final, created_at, updated_at";

const FIVE_WICKET_COLUMNS: &str =
    "five_wicket_inning_id, statistic_id, wickets, runs, is_in_final, created_at, updated_at";

/// A hundred joined with the season and grade of its statistic row.
#[derive(Debug, Clone)]
pub struct HundredWithContext {
    pub hundred: HundredRow,
    pub season_year: i32,
    pub grade_name: String,
}

/// A five-wicket innings joined with the season and grade of its
/// statistic row.
#[derive(Debug, Clone)]
pub struct FiveWicketInningWithContext {
    pub inning: FiveWicketInningRow,
    pub season_year: i32,
    pub grade_name: String,
}

/// Milestones repository for database operations.
pub struct MilestonesRepository;

impl MilestonesRepository {
    /// Record a hundred against a statistic row.
    #[instrument(skip(pool), name = "stats.repo.create_hundred")]
    pub async fn create_hundred(
        pool: &PgPool,
        statistic_id: i64,
        runs: i32,
        is_not_out: bool,
        is_in_final: bool,
    ) -> Result<HundredRow, StatsError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO hundreds (statistic_id, runs, is_not_out, is_in_final)
            VALUES ($1, $2, $3, $4)
            RETURNING {HUNDRED_COLUMNS}
            "#,
        ))
        .bind(statistic_id) // $1
        .bind(runs) // $2
        .bind(is_not_out) // $3
        .bind(is_in_final) // $4
        .fetch_one(pool)
        .await?;

        Ok(map_row_to_hundred(row))
    }

    /// List a player's hundreds in senior grades, highest score first.
    #[instrument(skip(pool), name = "stats.repo.list_player_hundreds")]
    pub async fn list_hundreds_for_player(
        pool: &PgPool,
        player_id: i64,
    ) -> Result<Vec<HundredWithContext>, StatsError> {
        let rows = sqlx::query(
            r#"
            SELECT h.hundred_id, h.statistic_id, h.runs, h.is_not_out, h.is_in_final,
                   h.created_at, h.updated_at,
                   se.year AS season_year, g.name AS grade_name
            FROM hundreds h
            JOIN statistics s ON s.statistic_id = h.statistic_id
            JOIN seasons se ON se.season_id = s.season_id
            JOIN grades g ON g.grade_id = s.grade_id
            WHERE s.player_id = $1 AND g.is_senior
            ORDER BY h.runs DESC, h.is_not_out DESC, h.is_in_final DESC, se.year DESC
            "#,
        )
        .bind(player_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| HundredWithContext {
                season_year: row.get("season_year"),
                grade_name: row.get("grade_name"),
                hundred: map_row_to_hundred(row),
            })
            .collect())
    }

    /// Delete a hundred.
    #[instrument(skip(pool), name = "stats.repo.delete_hundred")]
    pub async fn delete_hundred(pool: &PgPool, hundred_id: i64) -> Result<(), StatsError> {
        let result = sqlx::query("DELETE FROM hundreds WHERE hundred_id = $1")
            .bind(hundred_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StatsError::NotFound("Hundred not found".to_string()));
        }

        Ok(())
    }

    /// Record a five-wicket innings against a statistic row.
    #[instrument(skip(pool), name = "stats.repo.create_five_wicket_inning")]
    pub async fn create_five_wicket_inning(
        pool: &PgPool,
        statistic_id: i64,
        wickets: i32,
        runs: i32,
        is_in_final: bool,
    ) -> Result<FiveWicketInningRow, StatsError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO five_wicket_innings (statistic_id, wickets, runs, is_in_final)
            VALUES ($1, $2, $3, $4)
            RETURNING {FIVE_WICKET_COLUMNS}
            "#,
        ))
        .bind(statistic_id) // $1
        .bind(wickets) // $2
        .bind(runs) // $3
        .bind(is_in_final) // $4
        .fetch_one(pool)
        .await?;

        Ok(map_row_to_five_wicket_inning(row))
    }

    /// List a player's five-wicket innings in senior grades, best figures
    /// first.
    #[instrument(skip(pool), name = "stats.repo.list_player_five_wicket_innings")]
    pub async fn list_five_wicket_innings_for_player(
        pool: &PgPool,
        player_id: i64,
    ) -> Result<Vec<FiveWicketInningWithContext>, StatsError> {
        let rows = sqlx::query(
            r#"
            SELECT f.five_wicket_inning_id, f.statistic_id, f.wickets, f.runs,
                   f.is_in_final, f.created_at, f.updated_at,
                   se.year AS season_year, g.name AS grade_name
            FROM five_wicket_innings f
            JOIN statistics s ON s.statistic_id = f.statistic_id
            JOIN seasons se ON se.season_id = s.season_id
            JOIN grades g ON g.grade_id = s.grade_id
            WHERE s.player_id = $1 AND g.is_senior
            ORDER BY f.wickets DESC, f.runs ASC, f.is_in_final DESC, se.year DESC
            "#,
        )
        .bind(player_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| FiveWicketInningWithContext {
                season_year: row.get("season_year"),
                grade_name: row.get("grade_name"),
                inning: map_row_to_five_wicket_inning(row),
            })
            .collect())
    }

    /// Delete a five-wicket innings.
    #[instrument(skip(pool), name = "stats.repo.delete_five_wicket_inning")]
    pub async fn delete_five_wicket_inning(
        pool: &PgPool,
        five_wicket_inning_id: i64,
    ) -> Result<(), StatsError> {
        let result = sqlx::query(
            "DELETE FROM five_wicket_innings WHERE five_wicket_inning_id = $1",
        )
        .bind(five_wicket_inning_id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StatsError::NotFound(
                "Five-wicket innings not found".to_string(),
            ));
        }

        Ok(())
    }
}

/// Map a database row to a HundredRow struct.
pub fn map_row_to_hundred(row: PgRow) -> HundredRow {
    HundredRow {
        hundred_id: row.get("hundred_id"),
        statistic_id: row.get("statistic_id"),
        runs: row.get("runs"),
        is_not_out: row.get("is_not_out"),
        is_in_final: row.get("is_in_final"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Map a database row to a FiveWicketInningRow struct.
pub fn map_row_to_five_wicket_inning(row: PgRow) -> FiveWicketInningRow {
    FiveWicketInningRow {
        five_wicket_inning_id: row.get("five_wicket_inning_id"),
        statistic_id: row.get("statistic_id"),
        wickets: row.get("wickets"),
        runs: row.get("runs"),
        is_in_final: row.get("is_in_final"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
