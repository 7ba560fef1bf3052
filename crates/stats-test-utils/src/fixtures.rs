//! Database seed helpers for integration tests.
//!
//! Insert rows directly through the pool so tests can arrange data
//! without going through the HTTP API.

use anyhow::Result;
use sqlx::PgPool;

/// Counting columns for a seeded statistic row. Everything defaults to
/// zero; tests set only what they assert on.
#[derive(Debug, Clone, Default)]
pub struct StatisticSeed {
    pub matches: i32,
    pub batting_innings: i32,
    pub batting_runs: i32,
    pub batting_not_outs: i32,
    pub batting_fifties: i32,
    pub batting_high_score_runs: i32,
    pub batting_high_score_not_out: bool,
    pub bowling_balls: i32,
    pub bowling_runs: i32,
    pub bowling_wickets: i32,
    pub bowling_maidens: i32,
    pub best_bowling_wickets: i32,
    pub best_bowling_runs: i32,
    pub fielding_catches: i32,
    pub keeping_catches: i32,
    pub fielding_run_outs: i32,
    pub fielding_throw_outs: i32,
    pub keeping_stumpings: i32,
}

/// Insert a player with just first and last names.
pub async fn create_player(pool: &PgPool, first_name: &str, last_name: &str) -> Result<i64> {
    let (player_id,): (i64,) = sqlx::query_as(
        "INSERT INTO players (first_name, last_name) VALUES ($1, $2) RETURNING player_id",
    )
    .bind(first_name)
    .bind(last_name)
    .fetch_one(pool)
    .await?;
    Ok(player_id)
}

/// Insert a season by starting year.
pub async fn create_season(pool: &PgPool, year: i32) -> Result<i64> {
    let (season_id,): (i64,) =
        sqlx::query_as("INSERT INTO seasons (year) VALUES ($1) RETURNING season_id")
            .bind(year)
            .fetch_one(pool)
            .await?;
    Ok(season_id)
}

/// Insert a grade.
pub async fn create_grade(pool: &PgPool, name: &str, is_senior: bool) -> Result<i64> {
    let (grade_id,): (i64,) =
        sqlx::query_as("INSERT INTO grades (name, is_senior) VALUES ($1, $2) RETURNING grade_id")
            .bind(name)
            .bind(is_senior)
            .fetch_one(pool)
            .await?;
    Ok(grade_id)
}

/// Insert a statistic row for (player, season, grade).
pub async fn create_statistic(
    pool: &PgPool,
    player_id: i64,
    season_id: i64,
    grade_id: i64,
    seed: &StatisticSeed,
) -> Result<i64> {
    let (statistic_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO statistics (
            player_id, season_id, grade_id, matches,
            batting_innings, batting_runs, batting_not_outs, batting_fifties,
            batting_high_score_runs, batting_high_score_not_out,
            bowling_balls, bowling_runs, bowling_wickets, bowling_maidens,
            best_bowling_wickets, best_bowling_runs,
            fielding_catches, keeping_catches, fielding_run_outs,
            fielding_throw_outs, keeping_stumpings
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
            $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21
        )
        RETURNING statistic_id
        "#,
    )
    .bind(player_id)
    .bind(season_id)
    .bind(grade_id)
    .bind(seed.matches)
    .bind(seed.batting_innings)
    .bind(seed.batting_runs)
    .bind(seed.batting_not_outs)
    .bind(seed.batting_fifties)
    .bind(seed.batting_high_score_runs)
    .bind(seed.batting_high_score_not_out)
    .bind(seed.bowling_balls)
    .bind(seed.bowling_runs)
    .bind(seed.bowling_wickets)
    .bind(seed.bowling_maidens)
    .bind(seed.best_bowling_wickets)
    .bind(seed.best_bowling_runs)
    .bind(seed.fielding_catches)
    .bind(seed.keeping_catches)
    .bind(seed.fielding_run_outs)
    .bind(seed.fielding_throw_outs)
    .bind(seed.keeping_stumpings)
    .fetch_one(pool)
    .await?;
    Ok(statistic_id)
}

/// Record a hundred against a statistic row.
pub async fn add_hundred(
    pool: &PgPool,
    statistic_id: i64,
    runs: i32,
    is_not_out: bool,
    is_in_final: bool,
) -> Result<i64> {
    let (hundred_id,): (i64,) = sqlx::query_as(
        "INSERT INTO hundreds (statistic_id, runs, is_not_out, is_in_final) \
         VALUES ($1, $2, $3, $4) RETURNING hundred_id",
    )
    .bind(statistic_id)
    .bind(runs)
    .bind(is_not_out)
    .bind(is_in_final)
    .fetch_one(pool)
    .await?;
    Ok(hundred_id)
}

/// Record a five-wicket innings against a statistic row.
pub async fn add_five_wicket_inning(
    pool: &PgPool,
    statistic_id: i64,
    wickets: i32,
    runs: i32,
    is_in_final: bool,
) -> Result<i64> {
    let (five_wicket_inning_id,): (i64,) = sqlx::query_as(
        "INSERT INTO five_wicket_innings (statistic_id, wickets, runs, is_in_final) \
         VALUES ($1, $2, $3, $4) RETURNING five_wicket_inning_id",
    )
    .bind(statistic_id)
    .bind(wickets)
    .bind(runs)
    .bind(is_in_final)
    .fetch_one(pool)
    .await?;
    Ok(five_wicket_inning_id)
}
