//! Statistic handlers.
//!
//! Payloads carry compound figures as display strings; parsing failures
//! are 400 with the parse error message.

use crate::errors::StatsError;
use crate::models::{StatisticPayload, StatisticResponse};
use crate::repositories::StatisticsRepository;
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// `GET /api/v1/admin/statistics/{id}`
#[instrument(skip(state), name = "stats.handler.get_statistic")]
pub async fn get_statistic(
    State(state): State<Arc<AppState>>,
    Path(statistic_id): Path<i64>,
) -> Result<Json<StatisticResponse>, StatsError> {
    let statistic = StatisticsRepository::get(&state.pool, statistic_id).await?;
    Ok(Json(StatisticResponse::from(statistic)))
}

/// `POST /api/v1/admin/statistics` (superuser)
///
/// 409 when the (player, season, grade) tuple already has a row or a
/// referenced entity does not exist.
#[instrument(skip_all, name = "stats.handler.create_statistic")]
pub async fn create_statistic(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StatisticPayload>,
) -> Result<(StatusCode, Json<StatisticResponse>), StatsError> {
    let columns = payload.columns().map_err(StatsError::BadRequest)?;

    let statistic = StatisticsRepository::create(
        &state.pool,
        payload.player_id,
        payload.season_id,
        payload.grade_id,
        &columns,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(StatisticResponse::from(statistic))))
}

/// `PUT /api/v1/admin/statistics/{id}` (superuser)
///
/// Replaces the counting columns. The (player, season, grade) identity of
/// the row is immutable; payload identity fields must match the row.
#[instrument(skip(state, payload), name = "stats.handler.replace_statistic")]
pub async fn replace_statistic(
    State(state): State<Arc<AppState>>,
    Path(statistic_id): Path<i64>,
    Json(payload): Json<StatisticPayload>,
) -> Result<Json<StatisticResponse>, StatsError> {
    let columns = payload.columns().map_err(StatsError::BadRequest)?;

    let existing = StatisticsRepository::get(&state.pool, statistic_id).await?;
    if (payload.player_id, payload.season_id, payload.grade_id)
        != (existing.player_id, existing.season_id, existing.grade_id)
    {
        return Err(StatsError::BadRequest(
            "player_id, season_id, and grade_id cannot be changed".to_string(),
        ));
    }

    let statistic = StatisticsRepository::replace(&state.pool, statistic_id, &columns).await?;
    Ok(Json(StatisticResponse::from(statistic)))
}

/// `DELETE /api/v1/admin/statistics/{id}` (superuser)
///
/// Attached hundreds and five-wicket innings cascade.
#[instrument(skip(state), name = "stats.handler.delete_statistic")]
pub async fn delete_statistic(
    State(state): State<Arc<AppState>>,
    Path(statistic_id): Path<i64>,
) -> Result<StatusCode, StatsError> {
    StatisticsRepository::delete(&state.pool, statistic_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
