//! Report query builder and executor.
//!
//! Assembles a single grouped SELECT over the statistics table from a
//! grouping, a metric column list, optional pre-filters, qualification
//! thresholds, and an ordering, then decodes rows into alias -> value
//! maps. All user-supplied values are bound parameters; SQL text comes
//! only from the static metric definitions.

use crate::errors::StatsError;
use crate::models::{season_label, PlayerRow};
use crate::reports::metrics::{ColumnKind, SelectColumn};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::fmt::Write as _;
use tracing::instrument;

/// How statistic rows are grouped before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One row per player across all seasons and grades.
    Career,
    /// One row per (player, season).
    Season,
    /// One row per (player, grade).
    Grade,
}

/// Sort direction. NULLs always sort last, so a descending average
/// leaderboard never leads with players who have no average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// One ORDER BY term, referencing a metric column by output alias.
#[derive(Debug, Clone, Copy)]
pub struct Ordering {
    pub alias: &'static str,
    pub direction: Direction,
}

/// Threshold comparison for qualifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    AtLeast,
}

/// A HAVING-clause threshold over a metric expression.
#[derive(Debug, Clone, Copy)]
pub struct Qualification {
    pub expr: &'static str,
    pub comparison: Comparison,
    pub threshold: i64,
}

/// Player identity attached to every report row.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub player_id: i64,
    /// Initials-and-surname form, e.g. "JH Smith".
    pub name: String,
}

/// Season attached to season-grouped rows.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonSummary {
    pub season_id: i64,
    pub year: i32,
    /// "YYYY/YY" display label.
    pub label: String,
}

/// Grade attached to grade-grouped rows.
#[derive(Debug, Clone, Serialize)]
pub struct GradeSummary {
    pub grade_id: i64,
    pub name: String,
}

/// One decoded report row: who, where, and the metric values.
///
/// NULL metric values (unguardable ratios) are absent from `values`.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub player: PlayerSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<SeasonSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<GradeSummary>,
    pub values: Map<String, Value>,
}

/// A fully specified aggregate report query.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    grouping: Grouping,
    player_id: Option<i64>,
    season_id: Option<i64>,
    grade_id: Option<i64>,
    columns: Vec<SelectColumn>,
    qualifications: Vec<Qualification>,
    order: Vec<Ordering>,
    limit: i64,
    offset: i64,
}

impl ReportQuery {
    /// Start a query with a grouping and metric columns. Only senior-grade
    /// statistic rows count toward published records, so every query
    /// carries the senior filter.
    pub fn new(grouping: Grouping, columns: Vec<SelectColumn>) -> Self {
        ReportQuery {
            grouping,
            player_id: None,
            season_id: None,
            grade_id: None,
            columns,
            qualifications: Vec::new(),
            order: Vec::new(),
            limit: 50,
            offset: 0,
        }
    }

    /// Restrict to a single player.
    pub fn player(mut self, player_id: i64) -> Self {
        self.player_id = Some(player_id);
        self
    }

    /// Restrict to a single season.
    pub fn season(mut self, season_id: Option<i64>) -> Self {
        self.season_id = season_id;
        self
    }

    /// Restrict to a single grade.
    pub fn grade(mut self, grade_id: Option<i64>) -> Self {
        self.grade_id = grade_id;
        self
    }

    /// Add a qualification threshold.
    pub fn qualify(mut self, qualification: Qualification) -> Self {
        self.qualifications.push(qualification);
        self
    }

    /// Add qualification thresholds.
    pub fn qualify_all(mut self, qualifications: &[Qualification]) -> Self {
        self.qualifications.extend_from_slice(qualifications);
        self
    }

    /// Set the ordering.
    pub fn order_by(mut self, order: &[Ordering]) -> Self {
        self.order = order.to_vec();
        self
    }

    /// Set limit and offset.
    pub fn page(mut self, limit: i64, offset: i64) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    /// Assemble the SQL text and the bound integer parameters, in bind
    /// order.
    fn build_sql(&self) -> (String, Vec<i64>) {
        let mut sql = String::from(
            "SELECT p.player_id, p.first_name, p.nickname, p.middle_names, p.last_name",
        );

        match self.grouping {
            Grouping::Career => {}
            Grouping::Season => sql.push_str(", se.season_id, se.year"),
            Grouping::Grade => sql.push_str(", g.grade_id, g.name AS grade_name"),
        }

        for column in &self.columns {
            let cast = match column.kind {
                ColumnKind::Int => "bigint",
                ColumnKind::Float => "float8",
            };
            let _ = write!(
                sql,
                ", ({})::{} AS \"{}\"",
                column.expr, cast, column.alias
            );
        }

        sql.push_str(
            " FROM statistics s \
             JOIN players p ON p.player_id = s.player_id \
             JOIN seasons se ON se.season_id = s.season_id \
             JOIN grades g ON g.grade_id = s.grade_id",
        );

        let mut params: Vec<i64> = Vec::new();
        let mut clauses: Vec<String> = Vec::new();

        clauses.push("g.is_senior".to_string());
        if let Some(player_id) = self.player_id {
            params.push(player_id);
            clauses.push(format!("s.player_id = ${}", params.len()));
        }
        if let Some(season_id) = self.season_id {
            params.push(season_id);
            clauses.push(format!("s.season_id = ${}", params.len()));
        }
        if let Some(grade_id) = self.grade_id {
            params.push(grade_id);
            clauses.push(format!("s.grade_id = ${}", params.len()));
        }

        let _ = write!(sql, " WHERE {}", clauses.join(" AND "));

        // Non-key columns of the joined tables are functionally dependent
        // on the grouped primary keys.
        sql.push_str(" GROUP BY p.player_id");
        match self.grouping {
            Grouping::Career => {}
            Grouping::Season => sql.push_str(", se.season_id"),
            Grouping::Grade => sql.push_str(", g.grade_id"),
        }

        let mut having: Vec<String> = Vec::new();
        for qualification in &self.qualifications {
            params.push(qualification.threshold);
            let op = match qualification.comparison {
                Comparison::GreaterThan => ">",
                Comparison::AtLeast => ">=",
            };
            having.push(format!(
                "({}) {} ${}",
                qualification.expr,
                op,
                params.len()
            ));
        }
        if !having.is_empty() {
            let _ = write!(sql, " HAVING {}", having.join(" AND "));
        }

        sql.push_str(" ORDER BY ");
        for ordering in &self.order {
            let direction = match ordering.direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            let _ = write!(sql, "\"{}\" {} NULLS LAST, ", ordering.alias, direction);
        }
        sql.push_str("p.last_name, p.first_name, p.player_id");
        match self.grouping {
            Grouping::Career => {}
            Grouping::Season => sql.push_str(", se.year DESC"),
            Grouping::Grade => sql.push_str(", g.name"),
        }

        params.push(self.limit);
        let _ = write!(sql, " LIMIT ${}", params.len());
        params.push(self.offset);
        let _ = write!(sql, " OFFSET ${}", params.len());

        (sql, params)
    }

    /// Run the query and decode one [`ReportRow`] per group.
    #[instrument(skip_all, name = "stats.report.run")]
    pub async fn run(&self, pool: &PgPool) -> Result<Vec<ReportRow>, StatsError> {
        let (sql, params) = self.build_sql();

        let mut query = sqlx::query(&sql);
        for param in params {
            query = query.bind(param);
        }

        let rows = query.fetch_all(pool).await?;

        let mut report_rows = Vec::with_capacity(rows.len());
        for row in rows {
            report_rows.push(self.decode_row(&row)?);
        }
        Ok(report_rows)
    }

    fn decode_row(&self, row: &PgRow) -> Result<ReportRow, StatsError> {
        let player = PlayerRow {
            player_id: row.try_get("player_id")?,
            first_name: row.try_get("first_name")?,
            nickname: row.try_get("nickname")?,
            middle_names: row.try_get("middle_names")?,
            last_name: row.try_get("last_name")?,
            squad_number: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let player = PlayerSummary {
            player_id: player.player_id,
            name: player.short_name(),
        };

        let season = if self.grouping == Grouping::Season {
            let year: i32 = row.try_get("year")?;
            Some(SeasonSummary {
                season_id: row.try_get("season_id")?,
                year,
                label: season_label(year),
            })
        } else {
            None
        };

        let grade = if self.grouping == Grouping::Grade {
            Some(GradeSummary {
                grade_id: row.try_get("grade_id")?,
                name: row.try_get("grade_name")?,
            })
        } else {
            None
        };

        let mut values = Map::new();
        for column in &self.columns {
            match column.kind {
                ColumnKind::Int => {
                    if let Some(value) = row.try_get::<Option<i64>, _>(column.alias)? {
                        values.insert(column.alias.to_string(), Value::from(value));
                    }
                }
                ColumnKind::Float => {
                    if let Some(value) = row.try_get::<Option<f64>, _>(column.alias)? {
                        if let Some(number) = serde_json::Number::from_f64(value) {
                            values.insert(column.alias.to_string(), Value::Number(number));
                        }
                    }
                }
            }
        }

        synthesize_display_values(&mut values);

        Ok(ReportRow {
            player,
            season,
            grade,
            values,
        })
    }
}

/// Derive display strings from decoded numeric values: the "2004-2011"
/// season span and the "47.3" overs form.
fn synthesize_display_values(values: &mut Map<String, Value>) {
    if let (Some(first), Some(last)) = (
        values.get("first_year").and_then(Value::as_i64),
        values.get("last_year").and_then(Value::as_i64),
    ) {
        values.insert("seasons".to_string(), Value::from(format!("{}-{}", first, last)));
    }

    if let Some(balls) = values.get("bowling_balls").and_then(Value::as_i64) {
        let balls = i32::try_from(balls).unwrap_or(i32::MAX);
        values.insert(
            "overs".to_string(),
            Value::from(crate::models::Overs::from_balls(balls).to_string()),
        );
    }
}

/// Best-innings listings. These are not aggregates: each row is one
/// statistic row's best-of columns, ordered directly.
pub struct BestInnings;

impl BestInnings {
    /// Highest scores: runs desc, not-out first among equals.
    #[instrument(skip_all, name = "stats.report.best_batting")]
    pub async fn batting(
        pool: &PgPool,
        season_id: Option<i64>,
        grade_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReportRow>, StatsError> {
        Self::run(
            pool,
            "s.batting_high_score_runs > 0",
            "s.batting_high_score_runs DESC, s.batting_high_score_not_out DESC",
            season_id,
            grade_id,
            limit,
            offset,
            |row, values| {
                let runs: i32 = row.try_get("batting_high_score_runs")?;
                let not_out: bool = row.try_get("batting_high_score_not_out")?;
                let score = crate::models::HighScore { runs, not_out };
                values.insert("high_score".to_string(), Value::from(score.to_string()));
                Ok(())
            },
        )
        .await
    }

    /// Best bowling figures: wickets desc, then fewest runs.
    #[instrument(skip_all, name = "stats.report.best_bowling")]
    pub async fn bowling(
        pool: &PgPool,
        season_id: Option<i64>,
        grade_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReportRow>, StatsError> {
        Self::run(
            pool,
            "(s.best_bowling_wickets > 0 OR s.best_bowling_runs > 0)",
            "s.best_bowling_wickets DESC, s.best_bowling_runs ASC",
            season_id,
            grade_id,
            limit,
            offset,
            |row, values| {
                let wickets: i32 = row.try_get("best_bowling_wickets")?;
                let runs: i32 = row.try_get("best_bowling_runs")?;
                let figures = crate::models::BowlingFigures { wickets, runs };
                values.insert("best_bowling".to_string(), Value::from(figures.to_string()));
                Ok(())
            },
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn run(
        pool: &PgPool,
        non_empty: &str,
        order: &str,
        season_id: Option<i64>,
        grade_id: Option<i64>,
        limit: i64,
        offset: i64,
        decode: impl Fn(&PgRow, &mut Map<String, Value>) -> Result<(), StatsError>,
    ) -> Result<Vec<ReportRow>, StatsError> {
        let mut params: Vec<i64> = Vec::new();
        let mut clauses = vec![format!("g.is_senior AND {}", non_empty)];

        if let Some(season_id) = season_id {
            params.push(season_id);
            clauses.push(format!("s.season_id = ${}", params.len()));
        }
        if let Some(grade_id) = grade_id {
            params.push(grade_id);
            clauses.push(format!("s.grade_id = ${}", params.len()));
        }

        params.push(limit);
        let limit_param = params.len();
        params.push(offset);
        let offset_param = params.len();

        let sql = format!(
            "SELECT p.player_id, p.first_name, p.nickname, p.middle_names, p.last_name, \
             se.season_id, se.year, g.grade_id, g.name AS grade_name, \
             s.batting_high_score_runs, s.batting_high_score_not_out, \
             s.best_bowling_wickets, s.best_bowling_runs \
             FROM statistics s \
             JOIN players p ON p.player_id = s.player_id \
             JOIN seasons se ON se.season_id = s.season_id \
             JOIN grades g ON g.grade_id = s.grade_id \
             WHERE {} \
             ORDER BY {}, g.name, se.year DESC, p.last_name, p.player_id \
             LIMIT ${} OFFSET ${}",
            clauses.join(" AND "),
            order,
            limit_param,
            offset_param,
        );

        let mut query = sqlx::query(&sql);
        for param in params {
            query = query.bind(param);
        }

        let rows = query.fetch_all(pool).await?;

        let mut report_rows = Vec::with_capacity(rows.len());
        for row in rows {
            let player = PlayerRow {
                player_id: row.try_get("player_id")?,
                first_name: row.try_get("first_name")?,
                nickname: row.try_get("nickname")?,
                middle_names: row.try_get("middle_names")?,
                last_name: row.try_get("last_name")?,
                squad_number: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            let year: i32 = row.try_get("year")?;

            let mut values = Map::new();
            decode(&row, &mut values)?;

            report_rows.push(ReportRow {
                player: PlayerSummary {
                    player_id: player.player_id,
                    name: player.short_name(),
                },
                season: Some(SeasonSummary {
                    season_id: row.try_get("season_id")?,
                    year,
                    label: season_label(year),
                }),
                grade: Some(GradeSummary {
                    grade_id: row.try_get("grade_id")?,
                    name: row.try_get("grade_name")?,
                }),
                values,
            });
        }
        Ok(report_rows)
    }
}
