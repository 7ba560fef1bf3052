//! Declarative aggregate metrics.
//!
//! A metric is a reusable bundle of SELECT expressions over the grouped
//! `statistics` table (aliased `s`, with `p`/`se`/`g` joins for players,
//! seasons, and grades). Reports compose bundles with [`merge`], which
//! deduplicates by output alias so overlapping bundles stay cheap to
//! combine.
//!
//! Ratio metrics guard their denominators and yield NULL for empty ones,
//! so a wicketless bowler has no bowling average rather than an error.
//! Integer expressions are cast to BIGINT and ratios to FLOAT8 at query
//! time so row decoding is uniform.

/// Output type of a metric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Decoded as BIGINT.
    Int,
    /// Decoded as nullable FLOAT8.
    Float,
}

/// One SELECT column of a report: an aggregate expression with its output
/// alias and a short display label.
#[derive(Debug, Clone, Copy)]
pub struct SelectColumn {
    pub alias: &'static str,
    pub label: &'static str,
    pub expr: &'static str,
    pub kind: ColumnKind,
}

const fn int(alias: &'static str, label: &'static str, expr: &'static str) -> SelectColumn {
    SelectColumn {
        alias,
        label,
        expr,
        kind: ColumnKind::Int,
    }
}

const fn float(alias: &'static str, label: &'static str, expr: &'static str) -> SelectColumn {
    SelectColumn {
        alias,
        label,
        expr,
        kind: ColumnKind::Float,
    }
}

/// Matches played.
pub const MATCHES: &[SelectColumn] = &[int("matches", "Mat", "SUM(s.matches)")];

/// Batting: innings, runs, average, and the boundary/milestone counts.
pub const BATTING: &[SelectColumn] = &[
    int("matches", "Mat", "SUM(s.matches)"),
    int("batting_innings", "Inns", "SUM(s.batting_innings)"),
    int("batting_not_outs", "NO", "SUM(s.batting_not_outs)"),
    int("batting_runs", "Runs", "SUM(s.batting_runs)"),
    float(
        "batting_average",
        "Ave",
        "CASE WHEN SUM(s.batting_innings) - SUM(s.batting_not_outs) > 0 \
         THEN SUM(s.batting_runs)::float8 / (SUM(s.batting_innings) - SUM(s.batting_not_outs)) \
         END",
    ),
    int(
        "hundreds",
        "100s",
        "COALESCE(SUM((SELECT COUNT(*) FROM hundreds h \
         WHERE h.statistic_id = s.statistic_id)), 0)",
    ),
    int("batting_fifties", "50s", "SUM(s.batting_fifties)"),
    int("batting_ducks", "0s", "SUM(s.batting_ducks)"),
    int("batting_fours", "4s", "SUM(s.batting_fours)"),
    int("batting_sixes", "6s", "SUM(s.batting_sixes)"),
];

/// Bowling: balls, wickets, the guarded rate metrics, and five-fors.
///
/// The strike-rate guard is on wickets: balls per wicket is undefined
/// until a wicket has fallen.
pub const BOWLING: &[SelectColumn] = &[
    int("matches", "Mat", "SUM(s.matches)"),
    int("bowling_balls", "Balls", "SUM(s.bowling_balls)"),
    int("bowling_maidens", "Mdns", "SUM(s.bowling_maidens)"),
    int("bowling_runs", "Runs", "SUM(s.bowling_runs)"),
    int("bowling_wickets", "Wkts", "SUM(s.bowling_wickets)"),
    float(
        "bowling_average",
        "Ave",
        "CASE WHEN SUM(s.bowling_wickets) > 0 \
         THEN SUM(s.bowling_runs)::float8 / SUM(s.bowling_wickets) END",
    ),
    float(
        "economy_rate",
        "Econ",
        "CASE WHEN SUM(s.bowling_balls) > 0 \
         THEN SUM(s.bowling_runs)::float8 * 6 / SUM(s.bowling_balls) END",
    ),
    float(
        "strike_rate",
        "SR",
        "CASE WHEN SUM(s.bowling_wickets) > 0 \
         THEN SUM(s.bowling_balls)::float8 / SUM(s.bowling_wickets) END",
    ),
    int(
        "five_wicket_innings",
        "5WI",
        "COALESCE(SUM((SELECT COUNT(*) FROM five_wicket_innings f \
         WHERE f.statistic_id = s.statistic_id)), 0)",
    ),
];

/// Fielding: outfield catches and run-outs. Catches taken as keeper are
/// wicketkeeping dismissals, not fielding catches.
pub const FIELDING: &[SelectColumn] = &[
    int("matches", "Mat", "SUM(s.matches)"),
    int("catches", "Ct", "SUM(s.fielding_catches)"),
    int(
        "run_outs",
        "RO",
        "SUM(s.fielding_run_outs + s.fielding_throw_outs)",
    ),
];

/// Wicketkeeping: dismissals split into catches and stumpings.
pub const WICKETKEEPING: &[SelectColumn] = &[
    int("matches", "Mat", "SUM(s.matches)"),
    int(
        "keeping_dismissals",
        "Dis",
        "SUM(s.keeping_catches + s.keeping_stumpings)",
    ),
    int("keeping_catches", "Ct", "SUM(s.keeping_catches)"),
    int("keeping_stumpings", "St", "SUM(s.keeping_stumpings)"),
];

/// Career span: first season year and the year the last season ended.
/// Rendered as a "2004-2011" label in report output.
pub const SEASON_SPAN: &[SelectColumn] = &[
    int("first_year", "Seasons", "MIN(se.year)"),
    int("last_year", "Seasons", "MAX(se.year) + 1"),
];

/// Merge metric bundles in order, deduplicating by alias.
///
/// The first occurrence of an alias wins, so shared columns such as
/// `matches` keep their leftmost position.
pub fn merge(bundles: &[&[SelectColumn]]) -> Vec<SelectColumn> {
    let mut merged: Vec<SelectColumn> = Vec::new();
    for bundle in bundles {
        for column in *bundle {
            if !merged.iter().any(|c| c.alias == column.alias) {
                merged.push(*column);
            }
        }
    }
    merged
}

/// Everything at once, for career pages.
pub fn all_disciplines() -> Vec<SelectColumn> {
    merge(&[BATTING, BOWLING, FIELDING, WICKETKEEPING])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_dedupes_by_alias() {
        let merged = merge(&[BATTING, BOWLING]);

        let matches_count = merged.iter().filter(|c| c.alias == "matches").count();
        assert_eq!(matches_count, 1);

        // Shared column keeps its leftmost position.
        assert_eq!(merged.first().map(|c| c.alias), Some("matches"));
    }

    #[test]
    fn test_merge_preserves_order_within_bundle() {
        let merged = merge(&[FIELDING]);
        let aliases: Vec<&str> = merged.iter().map(|c| c.alias).collect();
        assert_eq!(aliases, vec!["matches", "catches", "run_outs"]);
    }

    #[test]
    fn test_all_disciplines_has_no_duplicate_aliases() {
        let merged = all_disciplines();
        for column in &merged {
            let count = merged.iter().filter(|c| c.alias == column.alias).count();
            assert_eq!(count, 1, "duplicate alias {}", column.alias);
        }
    }

    #[test]
    fn test_ratio_metrics_guard_their_denominators() {
        for bundle in [BATTING, BOWLING] {
            for column in bundle {
                if column.kind == ColumnKind::Float {
                    assert!(
                        column.expr.starts_with("CASE WHEN"),
                        "{} is unguarded",
                        column.alias
                    );
                }
            }
        }
    }

    #[test]
    fn test_fielding_catches_exclude_keeper_catches() {
        let catches = FIELDING
            .iter()
            .find(|c| c.alias == "catches")
            .expect("catches metric");
        assert!(!catches.expr.contains("keeping_catches"));
    }

    #[test]
    fn test_strike_rate_guards_on_wickets() {
        let strike_rate = BOWLING
            .iter()
            .find(|c| c.alias == "strike_rate")
            .expect("strike_rate metric");
        assert!(strike_rate.expr.contains("SUM(s.bowling_wickets) > 0"));
    }
}
