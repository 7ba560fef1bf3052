//! Report handlers.

use crate::config::MAX_REPORT_LIMIT;
use crate::errors::StatsError;
use crate::reports::catalog::{self, ColumnMeta, ReportKind, Scope};
use crate::reports::query::{Grouping, ReportQuery, ReportRow};
use crate::reports::BestInnings;
use crate::routes::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

/// Query parameters accepted by every report.
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    /// Restrict to one grade.
    pub grade: Option<i64>,
    /// Restrict to one season.
    pub season: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A rendered report: title, optional qualification caption, column
/// layout, and rows.
#[derive(Debug, serde::Serialize)]
pub struct ReportResponse {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<ReportRow>,
}

/// `GET /api/v1/reports/{category}/{measure}/{scope}`
///
/// Looks the report up in the catalog and executes it. Unknown
/// combinations are 404.
#[instrument(skip(state, params), name = "stats.handler.get_report")]
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path((category, measure, scope)): Path<(String, String, String)>,
    Query(params): Query<ReportParams>,
) -> Result<Json<ReportResponse>, StatsError> {
    let scope = Scope::parse(&scope)
        .ok_or_else(|| StatsError::NotFound("Unknown report scope".to_string()))?;

    let spec = catalog::lookup(&category, &measure, scope)
        .ok_or_else(|| StatsError::NotFound("Unknown report".to_string()))?;

    let limit = params
        .limit
        .unwrap_or(state.config.report_limit)
        .clamp(1, MAX_REPORT_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let rows = match &spec.kind {
        ReportKind::Aggregate {
            columns,
            order,
            qualifications,
        } => {
            let grouping = match scope {
                Scope::Career => Grouping::Career,
                Scope::Season => Grouping::Season,
            };
            ReportQuery::new(grouping, columns.clone())
                .season(params.season)
                .grade(params.grade)
                .qualify_all(qualifications)
                .order_by(order)
                .page(limit, offset)
                .run(&state.pool)
                .await?
        }
        ReportKind::BestBatting => {
            BestInnings::batting(&state.pool, params.season, params.grade, limit, offset).await?
        }
        ReportKind::BestBowling => {
            BestInnings::bowling(&state.pool, params.season, params.grade, limit, offset).await?
        }
    };

    Ok(Json(ReportResponse {
        title: spec.title,
        caption: spec.caption,
        columns: spec.columns,
        rows,
    }))
}
