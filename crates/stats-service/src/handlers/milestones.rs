//! Milestone handlers: hundreds and five-wicket innings.

use crate::errors::StatsError;
use crate::models::{
    CreateFiveWicketInningRequest, CreateHundredRequest, FiveWicketInningResponse,
    HundredResponse,
};
use crate::repositories::{MilestonesRepository, StatisticsRepository};
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// `POST /api/v1/admin/statistics/{id}/hundreds` (superuser)
#[instrument(skip(state, request), name = "stats.handler.create_hundred")]
pub async fn create_hundred(
    State(state): State<Arc<AppState>>,
    Path(statistic_id): Path<i64>,
    Json(request): Json<CreateHundredRequest>,
) -> Result<(StatusCode, Json<HundredResponse>), StatsError> {
    request.validate().map_err(StatsError::BadRequest)?;

    // 404 for a missing statistic row rather than the FK's 409.
    StatisticsRepository::get(&state.pool, statistic_id).await?;

    let hundred = MilestonesRepository::create_hundred(
        &state.pool,
        statistic_id,
        request.runs,
        request.is_not_out,
        request.is_in_final,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(HundredResponse::from(hundred))))
}

/// `DELETE /api/v1/admin/hundreds/{id}` (superuser)
#[instrument(skip(state), name = "stats.handler.delete_hundred")]
pub async fn delete_hundred(
    State(state): State<Arc<AppState>>,
    Path(hundred_id): Path<i64>,
) -> Result<StatusCode, StatsError> {
    MilestonesRepository::delete_hundred(&state.pool, hundred_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/v1/admin/statistics/{id}/five-wicket-innings` (superuser)
#[instrument(skip(state, request), name = "stats.handler.create_five_wicket_inning")]
pub async fn create_five_wicket_inning(
    State(state): State<Arc<AppState>>,
    Path(statistic_id): Path<i64>,
    Json(request): Json<CreateFiveWicketInningRequest>,
) -> Result<(StatusCode, Json<FiveWicketInningResponse>), StatsError> {
    request.validate().map_err(StatsError::BadRequest)?;

    StatisticsRepository::get(&state.pool, statistic_id).await?;

    let inning = MilestonesRepository::create_five_wicket_inning(
        &state.pool,
        statistic_id,
        request.wickets,
        request.runs,
        request.is_in_final,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(FiveWicketInningResponse::from(inning)),
    ))
}

/// `DELETE /api/v1/admin/five-wicket-innings/{id}` (superuser)
#[instrument(skip(state), name = "stats.handler.delete_five_wicket_inning")]
pub async fn delete_five_wicket_inning(
    State(state): State<Arc<AppState>>,
    Path(five_wicket_inning_id): Path<i64>,
) -> Result<StatusCode, StatsError> {
    MilestonesRepository::delete_five_wicket_inning(&state.pool, five_wicket_inning_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
