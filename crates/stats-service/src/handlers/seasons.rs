//! Season handlers.

use crate::errors::StatsError;
use crate::models::{CreateSeasonRequest, SeasonResponse};
use crate::repositories::SeasonsRepository;
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// `GET /api/v1/seasons`
#[instrument(skip_all, name = "stats.handler.list_seasons")]
pub async fn list_seasons(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SeasonResponse>>, StatsError> {
    let seasons = SeasonsRepository::list(&state.pool).await?;
    Ok(Json(seasons.into_iter().map(SeasonResponse::from).collect()))
}

/// `POST /api/v1/admin/seasons` (superuser)
#[instrument(skip_all, name = "stats.handler.create_season")]
pub async fn create_season(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSeasonRequest>,
) -> Result<(StatusCode, Json<SeasonResponse>), StatsError> {
    request.validate().map_err(StatsError::BadRequest)?;

    let season = SeasonsRepository::create(&state.pool, request.year).await?;
    Ok((StatusCode::CREATED, Json(SeasonResponse::from(season))))
}

/// `DELETE /api/v1/admin/seasons/{id}` (superuser)
#[instrument(skip(state), name = "stats.handler.delete_season")]
pub async fn delete_season(
    State(state): State<Arc<AppState>>,
    Path(season_id): Path<i64>,
) -> Result<StatusCode, StatsError> {
    SeasonsRepository::delete(&state.pool, season_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
