//! Statistics repository for database operations.
//!
//! A statistic row is the unit of aggregation: one per
//! (player, season, grade).

use crate::errors::StatsError;
use crate::models::{StatisticColumns, StatisticRow};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

const STATISTIC_COLUMNS: &str = "statistic_id, player_id, season_id, grade_id, matches, \
     batting_innings, batting_runs, batting_not_outs, batting_fifties, batting_ducks, \
     batting_fours, batting_sixes, batting_high_score_runs, batting_high_score_not_out, \
     bowling_balls, bowling_runs, bowling_wickets, bowling_maidens, \
     best_bowling_wickets, best_bowling_runs, \
     fielding_catches, keeping_catches, fielding_run_outs, fielding_throw_outs, \
     keeping_stumpings, created_at, updated_at";

/// Statistics repository for database operations.
pub struct StatisticsRepository;

impl StatisticsRepository {
    /// Create a statistic row.
    ///
    /// A duplicate (player, season, grade) tuple or an unknown foreign key
    /// maps to 409 Conflict via the sqlx error mapping.
    #[instrument(skip(pool, columns), name = "stats.repo.create_statistic")]
    pub async fn create(
        pool: &PgPool,
        player_id: i64,
        season_id: i64,
        grade_id: i64,
        columns: &StatisticColumns,
    ) -> Result<StatisticRow, StatsError> {
        let row = bind_columns(
            sqlx::query(&format!(
                r#"
                INSERT INTO statistics (
                    player_id, season_id, grade_id, matches,
                    batting_innings, batting_runs, batting_not_outs, batting_fifties,
                    batting_ducks, batting_fours, batting_sixes,
                    batting_high_score_runs, batting_high_score_not_out,
                    bowling_balls, bowling_runs, bowling_wickets, bowling_maidens,
                    best_bowling_wickets, best_bowling_runs,
                    fielding_catches, keeping_catches, fielding_run_outs,
                    fielding_throw_outs, keeping_stumpings
                )
                VALUES (
                    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24
                )
                RETURNING {STATISTIC_COLUMNS}
                "#,
            ))
            .bind(player_id) // $1
            .bind(season_id) // $2
            .bind(grade_id), // $3
            columns,
        )
        .fetch_one(pool)
        .await?;

        Ok(map_row_to_statistic(row))
    }

    /// Replace the counting columns of an existing statistic row.
    #[instrument(skip(pool, columns), name = "stats.repo.replace_statistic")]
    pub async fn replace(
        pool: &PgPool,
        statistic_id: i64,
        columns: &StatisticColumns,
    ) -> Result<StatisticRow, StatsError> {
        let row = bind_columns(
            sqlx::query(&format!(
                r#"
                UPDATE statistics SET
                    matches = $2,
                    batting_innings = $3, batting_runs = $4, batting_not_outs = $5,
                    batting_fifties = $6, batting_ducks = $7, batting_fours = $8,
                    batting_sixes = $9,
                    batting_high_score_runs = $10, batting_high_score_not_out = $11,
                    bowling_balls = $12, bowling_runs = $13, bowling_wickets = $14,
                    bowling_maidens = $15,
                    best_bowling_wickets = $16, best_bowling_runs = $17,
                    fielding_catches = $18, keeping_catches = $19,
                    fielding_run_outs = $20, fielding_throw_outs = $21,
                    keeping_stumpings = $22,
                    updated_at = NOW()
                WHERE statistic_id = $1
                RETURNING {STATISTIC_COLUMNS}
                "#,
            ))
            .bind(statistic_id), // $1
            columns,
        )
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StatsError::NotFound("Statistic not found".to_string()))?;

        Ok(map_row_to_statistic(row))
    }

    /// Fetch a statistic row by id.
    #[instrument(skip(pool), name = "stats.repo.get_statistic")]
    pub async fn get(pool: &PgPool, statistic_id: i64) -> Result<StatisticRow, StatsError> {
        let row = sqlx::query(&format!(
            "SELECT {STATISTIC_COLUMNS} FROM statistics WHERE statistic_id = $1",
        ))
        .bind(statistic_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StatsError::NotFound("Statistic not found".to_string()))?;

        Ok(map_row_to_statistic(row))
    }

    /// Delete a statistic row. Attached milestones cascade.
    #[instrument(skip(pool), name = "stats.repo.delete_statistic")]
    pub async fn delete(pool: &PgPool, statistic_id: i64) -> Result<(), StatsError> {
        let result = sqlx::query("DELETE FROM statistics WHERE statistic_id = $1")
            .bind(statistic_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StatsError::NotFound("Statistic not found".to_string()));
        }

        Ok(())
    }
}

type PgQuery<'q> =
    sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>;

/// Append the counting columns as the next 21 positional parameters,
/// in the same order both the INSERT and UPDATE statements use.
fn bind_columns<'q>(query: PgQuery<'q>, columns: &StatisticColumns) -> PgQuery<'q> {
    query
        .bind(columns.matches)
        .bind(columns.batting_innings)
        .bind(columns.batting_runs)
        .bind(columns.batting_not_outs)
        .bind(columns.batting_fifties)
        .bind(columns.batting_ducks)
        .bind(columns.batting_fours)
        .bind(columns.batting_sixes)
        .bind(columns.batting_high_score_runs)
        .bind(columns.batting_high_score_not_out)
        .bind(columns.bowling_balls)
        .bind(columns.bowling_runs)
        .bind(columns.bowling_wickets)
        .bind(columns.bowling_maidens)
        .bind(columns.best_bowling_wickets)
        .bind(columns.best_bowling_runs)
        .bind(columns.fielding_catches)
        .bind(columns.keeping_catches)
        .bind(columns.fielding_run_outs)
        .bind(columns.fielding_throw_outs)
        .bind(columns.keeping_stumpings)
}

/// Map a database row to a StatisticRow struct.
pub fn map_row_to_statistic(row: PgRow) -> StatisticRow {
    StatisticRow {
        statistic_id: row.get("statistic_id"),
        player_id: row.get("player_id"),
        season_id: row.get("season_id"),
        grade_id: row.get("grade_id"),
        matches: row.get("matches"),
        batting_innings: row.get("batting_innings"),
        batting_runs: row.get("batting_runs"),
        batting_not_outs: row.get("batting_not_outs"),
        batting_fifties: row.get("batting_fifties"),
        batting_ducks: row.get("batting_ducks"),
        batting_fours: row.get("batting_fours"),
        batting_sixes: row.get("batting_sixes"),
        batting_high_score_runs: row.get("batting_high_score_runs"),
        batting_high_score_not_out: row.get("batting_high_score_not_out"),
        bowling_balls: row.get("bowling_balls"),
        bowling_runs: row.get("bowling_runs"),
        bowling_wickets: row.get("bowling_wickets"),
        bowling_maidens: row.get("bowling_maidens"),
        best_bowling_wickets: row.get("best_bowling_wickets"),
        best_bowling_runs: row.get("best_bowling_runs"),
        fielding_catches: row.get("fielding_catches"),
        keeping_catches: row.get("keeping_catches"),
        fielding_run_outs: row.get("fielding_run_outs"),
        fielding_throw_outs: row.get("fielding_throw_outs"),
        keeping_stumpings: row.get("keeping_stumpings"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
