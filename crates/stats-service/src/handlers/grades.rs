//! Grade handlers.

use crate::errors::StatsError;
use crate::models::{CreateGradeRequest, GradeResponse};
use crate::repositories::GradesRepository;
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// `GET /api/v1/grades`
#[instrument(skip_all, name = "stats.handler.list_grades")]
pub async fn list_grades(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GradeResponse>>, StatsError> {
    let grades = GradesRepository::list(&state.pool).await?;
    Ok(Json(grades.into_iter().map(GradeResponse::from).collect()))
}

/// `POST /api/v1/admin/grades` (superuser)
#[instrument(skip_all, name = "stats.handler.create_grade")]
pub async fn create_grade(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateGradeRequest>,
) -> Result<(StatusCode, Json<GradeResponse>), StatsError> {
    request.validate().map_err(StatsError::BadRequest)?;

    let grade = GradesRepository::create(
        &state.pool,
        request.name.trim(),
        request.is_senior.unwrap_or(true),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(GradeResponse::from(grade))))
}

/// `DELETE /api/v1/admin/grades/{id}` (superuser)
#[instrument(skip(state), name = "stats.handler.delete_grade")]
pub async fn delete_grade(
    State(state): State<Arc<AppState>>,
    Path(grade_id): Path<i64>,
) -> Result<StatusCode, StatsError> {
    GradesRepository::delete(&state.pool, grade_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
