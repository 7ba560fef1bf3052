//! Players repository for database operations.

use crate::errors::StatsError;
use crate::models::{PlayerRow, UpdatePlayerRequest};
use sqlx::{PgPool, Row};
use tracing::instrument;

const PLAYER_COLUMNS: &str = "player_id, first_name, nickname, middle_names, last_name, \
     squad_number, created_at, updated_at";

/// Players repository for database operations.
pub struct PlayersRepository;

impl PlayersRepository {
    /// Create a player.
    ///
    /// Returns 409 Conflict (via the sqlx error mapping) when the full name
    /// tuple or the squad number is already taken.
    #[instrument(skip_all, name = "stats.repo.create_player")]
    pub async fn create(
        pool: &PgPool,
        first_name: &str,
        nickname: &str,
        middle_names: &str,
        last_name: &str,
        squad_number: Option<i32>,
    ) -> Result<PlayerRow, StatsError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO players (first_name, nickname, middle_names, last_name, squad_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PLAYER_COLUMNS}
            "#,
        ))
        .bind(first_name) // $1
        .bind(nickname) // $2
        .bind(middle_names) // $3
        .bind(last_name) // $4
        .bind(squad_number) // $5
        .fetch_one(pool)
        .await?;

        Ok(map_row_to_player(row))
    }

    /// Fetch a player by id.
    #[instrument(skip(pool), name = "stats.repo.get_player")]
    pub async fn get(pool: &PgPool, player_id: i64) -> Result<PlayerRow, StatsError> {
        let row = sqlx::query(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE player_id = $1",
        ))
        .bind(player_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StatsError::NotFound("Player not found".to_string()))?;

        Ok(map_row_to_player(row))
    }

    /// List all players ordered by surname then first name.
    #[instrument(skip_all, name = "stats.repo.list_players")]
    pub async fn list(pool: &PgPool) -> Result<Vec<PlayerRow>, StatsError> {
        let rows = sqlx::query(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players ORDER BY last_name, first_name, player_id",
        ))
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(map_row_to_player).collect())
    }

    /// Apply a partial update to a player.
    ///
    /// Unset request fields keep their current values via COALESCE; the
    /// squad number uses a sentinel flag so an explicit null clears it.
    #[instrument(skip(pool, request), name = "stats.repo.update_player")]
    pub async fn update(
        pool: &PgPool,
        player_id: i64,
        request: &UpdatePlayerRequest,
    ) -> Result<PlayerRow, StatsError> {
        let (set_squad, squad_number) = match request.squad_number {
            Some(value) => (true, value),
            None => (false, None),
        };

        let row = sqlx::query(&format!(
            r#"
            UPDATE players SET
                first_name = COALESCE($2, first_name),
                nickname = COALESCE($3, nickname),
                middle_names = COALESCE($4, middle_names),
                last_name = COALESCE($5, last_name),
                squad_number = CASE WHEN $6 THEN $7 ELSE squad_number END,
                updated_at = NOW()
            WHERE player_id = $1
            RETURNING {PLAYER_COLUMNS}
            "#,
        ))
        .bind(player_id) // $1
        .bind(&request.first_name) // $2
        .bind(&request.nickname) // $3
        .bind(&request.middle_names) // $4
        .bind(&request.last_name) // $5
        .bind(set_squad) // $6
        .bind(squad_number) // $7
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StatsError::NotFound("Player not found".to_string()))?;

        Ok(map_row_to_player(row))
    }

    /// Delete a player.
    ///
    /// Fails with 409 Conflict when statistic rows still reference the
    /// player (ON DELETE RESTRICT).
    #[instrument(skip(pool), name = "stats.repo.delete_player")]
    pub async fn delete(pool: &PgPool, player_id: i64) -> Result<(), StatsError> {
        let result = sqlx::query("DELETE FROM players WHERE player_id = $1")
            .bind(player_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StatsError::NotFound("Player not found".to_string()));
        }

        Ok(())
    }
}

/// Map a database row to a PlayerRow struct.
pub fn map_row_to_player(row: sqlx::postgres::PgRow) -> PlayerRow {
    PlayerRow {
        player_id: row.get("player_id"),
        first_name: row.get("first_name"),
        nickname: row.get("nickname"),
        middle_names: row.get("middle_names"),
        last_name: row.get("last_name"),
        squad_number: row.get("squad_number"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
