//! Report catalog.
//!
//! Maps (category, measure, scope) path segments to a fully specified
//! report: metric columns, ordering, qualification thresholds, and the
//! display column list. Unknown combinations return `None`, which the
//! handler turns into a 404.

use crate::reports::metrics::{self, ColumnKind, SelectColumn};
use crate::reports::query::{Comparison, Direction, Ordering, Qualification};
use serde::Serialize;

/// Aggregation scope of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Grouped by player across all seasons.
    Career,
    /// Grouped by (player, season).
    Season,
}

impl Scope {
    /// Parse a path segment.
    pub fn parse(segment: &str) -> Option<Scope> {
        match segment {
            "career" => Some(Scope::Career),
            "season" => Some(Scope::Season),
            _ => None,
        }
    }

    fn word(self) -> &'static str {
        match self {
            Scope::Career => "career",
            Scope::Season => "season",
        }
    }
}

/// Display metadata for one report column, in table order.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnMeta {
    pub key: &'static str,
    pub label: &'static str,
    pub is_float: bool,
}

/// How the report's rows are produced.
#[derive(Debug, Clone)]
pub enum ReportKind {
    /// A grouped aggregate query.
    Aggregate {
        columns: Vec<SelectColumn>,
        order: Vec<Ordering>,
        qualifications: Vec<Qualification>,
    },
    /// Highest individual scores (statistic rows, no grouping).
    BestBatting,
    /// Best individual bowling figures (statistic rows, no grouping).
    BestBowling,
}

/// A catalog entry ready to execute.
#[derive(Debug, Clone)]
pub struct ReportSpec {
    pub title: String,
    /// Describes active qualification thresholds, when any.
    pub caption: Option<String>,
    pub scope: Scope,
    pub kind: ReportKind,
    pub columns: Vec<ColumnMeta>,
}

/// Look up a report by its path segments.
pub fn lookup(category: &str, measure: &str, scope: Scope) -> Option<ReportSpec> {
    let entry = match (category, measure) {
        ("batting", "runs") => aggregate(metrics::BATTING, desc("batting_runs"), vec![]),
        ("batting", "average") => {
            let qualifications = if scope == Scope::Season {
                vec![
                    at_least(metrics::BATTING, "batting_runs", 200)?,
                    at_least(metrics::BATTING, "batting_innings", 9)?,
                ]
            } else {
                vec![]
            };
            aggregate(metrics::BATTING, desc("batting_average"), qualifications)
        }
        ("batting", "hundreds") => aggregate(metrics::BATTING, desc("hundreds"), vec![]),
        ("batting", "best-innings") if scope == Scope::Career => ReportKind::BestBatting,

        ("bowling", "wickets") => aggregate(metrics::BOWLING, desc("bowling_wickets"), vec![]),
        ("bowling", "average") => aggregate(metrics::BOWLING, asc("bowling_average"), vec![]),
        ("bowling", "economy-rate") => aggregate(metrics::BOWLING, asc("economy_rate"), vec![]),
        ("bowling", "strike-rate") => aggregate(metrics::BOWLING, asc("strike_rate"), vec![]),
        ("bowling", "five-wicket-innings") => {
            aggregate(metrics::BOWLING, desc("five_wicket_innings"), vec![])
        }
        ("bowling", "best-innings") if scope == Scope::Career => ReportKind::BestBowling,

        ("fielding", "catches") => aggregate(
            metrics::FIELDING,
            desc("catches"),
            vec![greater_than(metrics::FIELDING, "catches", 0)?],
        ),
        ("fielding", "run-outs") => aggregate(
            metrics::FIELDING,
            desc("run_outs"),
            vec![greater_than(metrics::FIELDING, "run_outs", 0)?],
        ),

        ("wicketkeeping", "dismissals") => aggregate(
            metrics::WICKETKEEPING,
            desc("keeping_dismissals"),
            vec![greater_than(metrics::WICKETKEEPING, "keeping_dismissals", 0)?],
        ),
        ("wicketkeeping", "catches") => aggregate(
            metrics::WICKETKEEPING,
            desc("keeping_catches"),
            vec![greater_than(metrics::WICKETKEEPING, "keeping_catches", 0)?],
        ),
        ("wicketkeeping", "stumpings") => aggregate(
            metrics::WICKETKEEPING,
            desc("keeping_stumpings"),
            vec![greater_than(metrics::WICKETKEEPING, "keeping_stumpings", 0)?],
        ),

        ("misc", "matches") if scope == Scope::Career => {
            aggregate(metrics::MATCHES, desc("matches"), vec![])
        }

        _ => return None,
    };

    Some(finish(category, measure, scope, entry))
}

fn aggregate(
    bundle: &[SelectColumn],
    order: Ordering,
    qualifications: Vec<Qualification>,
) -> ReportKind {
    ReportKind::Aggregate {
        columns: metrics::merge(&[bundle]),
        order: vec![order],
        qualifications,
    }
}

fn desc(alias: &'static str) -> Ordering {
    Ordering {
        alias,
        direction: Direction::Desc,
    }
}

fn asc(alias: &'static str) -> Ordering {
    Ordering {
        alias,
        direction: Direction::Asc,
    }
}

fn threshold(
    bundle: &[SelectColumn],
    alias: &str,
    comparison: Comparison,
    value: i64,
) -> Option<Qualification> {
    let column = bundle.iter().find(|c| c.alias == alias)?;
    Some(Qualification {
        expr: column.expr,
        comparison,
        threshold: value,
    })
}

fn at_least(bundle: &[SelectColumn], alias: &str, value: i64) -> Option<Qualification> {
    threshold(bundle, alias, Comparison::AtLeast, value)
}

fn greater_than(bundle: &[SelectColumn], alias: &str, value: i64) -> Option<Qualification> {
    threshold(bundle, alias, Comparison::GreaterThan, value)
}

fn finish(category: &str, measure: &str, scope: Scope, kind: ReportKind) -> ReportSpec {
    let title = format!(
        "{}{} {} ({})",
        category
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default(),
        category.chars().skip(1).collect::<String>(),
        measure.replace('-', " "),
        scope.word(),
    );

    let caption = caption_for(category, measure, scope);

    let (kind, columns) = match kind {
        ReportKind::Aggregate {
            mut columns,
            order,
            qualifications,
        } => {
            if scope == Scope::Career {
                columns = metrics::merge(&[metrics::SEASON_SPAN, &columns]);
            }
            let metas = display_columns(&columns, scope);
            (
                ReportKind::Aggregate {
                    columns,
                    order,
                    qualifications,
                },
                metas,
            )
        }
        ReportKind::BestBatting => (
            ReportKind::BestBatting,
            vec![ColumnMeta {
                key: "high_score",
                label: "HS",
                is_float: false,
            }],
        ),
        ReportKind::BestBowling => (
            ReportKind::BestBowling,
            vec![ColumnMeta {
                key: "best_bowling",
                label: "BB",
                is_float: false,
            }],
        ),
    };

    ReportSpec {
        title,
        caption,
        scope,
        kind,
        columns,
    }
}

fn caption_for(category: &str, measure: &str, scope: Scope) -> Option<String> {
    match (category, measure, scope) {
        ("batting", "average", Scope::Season) => {
            Some("Minimum qualification: 200 runs 9 inns".to_string())
        }
        _ => None,
    }
}

/// Build the display column list: season span first (career only, as one
/// "Seasons" column), overs substituted for raw ball counts.
fn display_columns(columns: &[SelectColumn], scope: Scope) -> Vec<ColumnMeta> {
    let mut metas = Vec::new();

    if scope == Scope::Career && columns.iter().any(|c| c.alias == "first_year") {
        metas.push(ColumnMeta {
            key: "seasons",
            label: "Seasons",
            is_float: false,
        });
    }

    for column in columns {
        match column.alias {
            "first_year" | "last_year" => continue,
            "bowling_balls" => metas.push(ColumnMeta {
                key: "overs",
                label: "Overs",
                is_float: false,
            }),
            _ => metas.push(ColumnMeta {
                key: column.alias,
                label: column.label,
                is_float: column.kind == ColumnKind::Float,
            }),
        }
    }

    metas
}
