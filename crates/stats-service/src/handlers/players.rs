//! Player handlers: listing, the career page, and superuser CRUD.

use crate::errors::StatsError;
use crate::models::{
    season_label, CreatePlayerRequest, PlayerResponse, UpdatePlayerRequest,
};
use crate::reports::metrics;
use crate::reports::query::{Grouping, ReportQuery, ReportRow};
use crate::repositories::{MilestonesRepository, PlayersRepository};
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// Upper bound on per-grade / per-season rows on a career page. A player
/// cannot exceed this without centuries of service.
const CAREER_PAGE_ROWS: i64 = 500;

/// A milestone innings on the career page.
#[derive(Debug, Serialize)]
pub struct CareerMilestone {
    /// Season label, e.g. "2004/05".
    pub season: String,
    pub grade: String,
    /// Score ("143*#") or figures ("6/21#") string.
    pub value: String,
}

/// The full career page for one player.
///
/// Like the leaderboards, only senior-grade statistic rows count toward
/// a player's published record; junior rows never appear here.
#[derive(Debug, Serialize)]
pub struct CareerResponse {
    pub player: PlayerResponse,
    /// Career totals across all senior grades; absent for players with
    /// no senior statistic rows. Carries no grade object: the totals row
    /// spans every grade the player appears in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career: Option<ReportRow>,
    /// One row per grade played, with season span.
    pub grades: Vec<ReportRow>,
    /// One row per season played.
    pub seasons: Vec<ReportRow>,
    pub hundreds: Vec<CareerMilestone>,
    pub five_wicket_innings: Vec<CareerMilestone>,
}

/// `GET /api/v1/players`
#[instrument(skip_all, name = "stats.handler.list_players")]
pub async fn list_players(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlayerResponse>>, StatsError> {
    let players = PlayersRepository::list(&state.pool).await?;
    Ok(Json(players.into_iter().map(PlayerResponse::from).collect()))
}

/// `GET /api/v1/players/{id}` - the career page.
#[instrument(skip(state), name = "stats.handler.get_player")]
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
) -> Result<Json<CareerResponse>, StatsError> {
    let player = PlayersRepository::get(&state.pool, player_id).await?;

    let all_metrics = metrics::all_disciplines();

    let career = ReportQuery::new(Grouping::Career, all_metrics.clone())
        .player(player_id)
        .page(1, 0)
        .run(&state.pool)
        .await?
        .into_iter()
        .next();

    let grade_metrics = metrics::merge(&[metrics::SEASON_SPAN, all_metrics.as_slice()]);
    let grades = ReportQuery::new(Grouping::Grade, grade_metrics)
        .player(player_id)
        .page(CAREER_PAGE_ROWS, 0)
        .run(&state.pool)
        .await?;

    let seasons = ReportQuery::new(Grouping::Season, all_metrics)
        .player(player_id)
        .page(CAREER_PAGE_ROWS, 0)
        .run(&state.pool)
        .await?;

    let hundreds = MilestonesRepository::list_hundreds_for_player(&state.pool, player_id)
        .await?
        .into_iter()
        .map(|entry| CareerMilestone {
            season: season_label(entry.season_year),
            grade: entry.grade_name,
            value: entry.hundred.score(),
        })
        .collect();

    let five_wicket_innings =
        MilestonesRepository::list_five_wicket_innings_for_player(&state.pool, player_id)
            .await?
            .into_iter()
            .map(|entry| CareerMilestone {
                season: season_label(entry.season_year),
                grade: entry.grade_name,
                value: entry.inning.figures(),
            })
            .collect();

    Ok(Json(CareerResponse {
        player: PlayerResponse::from(player),
        career,
        grades,
        seasons,
        hundreds,
        five_wicket_innings,
    }))
}

/// `POST /api/v1/admin/players` (superuser)
#[instrument(skip_all, name = "stats.handler.create_player")]
pub async fn create_player(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<PlayerResponse>), StatsError> {
    request.validate().map_err(StatsError::BadRequest)?;

    let player = PlayersRepository::create(
        &state.pool,
        request.first_name.trim(),
        request.nickname.trim(),
        request.middle_names.trim(),
        request.last_name.trim(),
        request.squad_number,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(PlayerResponse::from(player))))
}

/// `PATCH /api/v1/admin/players/{id}` (superuser)
#[instrument(skip(state, request), name = "stats.handler.update_player")]
pub async fn update_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
    Json(request): Json<UpdatePlayerRequest>,
) -> Result<Json<PlayerResponse>, StatsError> {
    request.validate().map_err(StatsError::BadRequest)?;

    if !request.has_changes() {
        let player = PlayersRepository::get(&state.pool, player_id).await?;
        return Ok(Json(PlayerResponse::from(player)));
    }

    let player = PlayersRepository::update(&state.pool, player_id, &request).await?;
    Ok(Json(PlayerResponse::from(player)))
}

/// `DELETE /api/v1/admin/players/{id}` (superuser)
///
/// 409 while statistic rows still reference the player.
#[instrument(skip(state), name = "stats.handler.delete_player")]
pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
) -> Result<StatusCode, StatsError> {
    PlayersRepository::delete(&state.pool, player_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
