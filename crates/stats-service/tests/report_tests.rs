//! Report engine integration tests.
//!
//! Exercises the aggregation semantics end to end: guarded ratios,
//! qualification thresholds, grouping scopes, the senior-grade filter,
//! milestone counts, and best-innings listings.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use anyhow::Result;
use sqlx::PgPool;
use stats_test_utils::fixtures::{self, StatisticSeed};
use stats_test_utils::TestStatsServer;

async fn get_report(server: &TestStatsServer, path: &str) -> Result<serde_json::Value> {
    let response = reqwest::get(format!("{}/api/v1/reports/{}", server.url(), path)).await?;
    anyhow::ensure!(
        response.status() == 200,
        "report request failed: {}",
        response.status()
    );
    Ok(response.json().await?)
}

fn row_for<'a>(body: &'a serde_json::Value, player_id: i64) -> Option<&'a serde_json::Value> {
    body["rows"]
        .as_array()?
        .iter()
        .find(|row| row["player"]["player_id"] == player_id)
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_batting_average_guards_division_by_zero(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;

    let season = fixtures::create_season(&pool, 2004).await?;
    let grade = fixtures::create_grade(&pool, "First Grade", true).await?;

    let scorer = fixtures::create_player(&pool, "Alan", "Ames").await?;
    fixtures::create_statistic(
        &pool,
        scorer,
        season,
        grade,
        &StatisticSeed {
            matches: 10,
            batting_innings: 10,
            batting_runs: 400,
            batting_not_outs: 2,
            ..Default::default()
        },
    )
    .await?;

    // Never dismissed: innings == not-outs, so no average.
    let undefeated = fixtures::create_player(&pool, "Bob", "Burns").await?;
    fixtures::create_statistic(
        &pool,
        undefeated,
        season,
        grade,
        &StatisticSeed {
            matches: 5,
            batting_innings: 3,
            batting_runs: 90,
            batting_not_outs: 3,
            ..Default::default()
        },
    )
    .await?;

    let body = get_report(&server, "batting/average/career").await?;

    let scorer_row = row_for(&body, scorer).expect("scorer row");
    assert_eq!(scorer_row["values"]["batting_average"], 50.0);

    let undefeated_row = row_for(&body, undefeated).expect("undefeated row");
    assert!(undefeated_row["values"].get("batting_average").is_none());
    assert_eq!(undefeated_row["values"]["batting_runs"], 90);

    // Descending order, but NULL averages sort last.
    let rows = body["rows"].as_array().expect("rows");
    assert_eq!(rows.last().map(|r| &r["player"]["player_id"]), Some(&serde_json::json!(undefeated)));

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_bowling_strike_rate_null_for_wicketless(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;

    let season = fixtures::create_season(&pool, 2010).await?;
    let grade = fixtures::create_grade(&pool, "First Grade", true).await?;

    let wicketless = fixtures::create_player(&pool, "Carl", "Croft").await?;
    fixtures::create_statistic(
        &pool,
        wicketless,
        season,
        grade,
        &StatisticSeed {
            matches: 4,
            bowling_balls: 120,
            bowling_runs: 80,
            ..Default::default()
        },
    )
    .await?;

    let body = get_report(&server, "bowling/strike-rate/career").await?;
    let row = row_for(&body, wicketless).expect("row");

    assert!(row["values"].get("strike_rate").is_none());
    assert!(row["values"].get("bowling_average").is_none());
    // Economy is defined: balls were bowled.
    assert_eq!(row["values"]["economy_rate"], 4.0);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_season_average_qualification_thresholds(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;

    let season = fixtures::create_season(&pool, 2004).await?;
    let grade = fixtures::create_grade(&pool, "First Grade", true).await?;

    let qualified = fixtures::create_player(&pool, "Dan", "Drake").await?;
    fixtures::create_statistic(
        &pool,
        qualified,
        season,
        grade,
        &StatisticSeed {
            batting_innings: 10,
            batting_runs: 300,
            ..Default::default()
        },
    )
    .await?;

    // High average but under the 200-run floor.
    let cameo = fixtures::create_player(&pool, "Earl", "Evans").await?;
    fixtures::create_statistic(
        &pool,
        cameo,
        season,
        grade,
        &StatisticSeed {
            batting_innings: 9,
            batting_runs: 150,
            ..Default::default()
        },
    )
    .await?;

    let body = get_report(&server, "batting/average/season").await?;

    assert!(row_for(&body, qualified).is_some());
    assert!(row_for(&body, cameo).is_none());
    assert_eq!(body["caption"], "Minimum qualification: 200 runs 9 inns");

    // Career scope has no qualification; both appear.
    let career = get_report(&server, "batting/average/career").await?;
    assert!(row_for(&career, cameo).is_some());
    assert!(career.get("caption").is_none());

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_reports_exclude_non_senior_grades(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;

    let season = fixtures::create_season(&pool, 2004).await?;
    let senior = fixtures::create_grade(&pool, "First Grade", true).await?;
    let junior = fixtures::create_grade(&pool, "Under 16s", false).await?;

    let player = fixtures::create_player(&pool, "Fred", "Finch").await?;
    fixtures::create_statistic(
        &pool,
        player,
        season,
        senior,
        &StatisticSeed {
            batting_innings: 5,
            batting_runs: 100,
            ..Default::default()
        },
    )
    .await?;
    fixtures::create_statistic(
        &pool,
        player,
        season,
        junior,
        &StatisticSeed {
            batting_innings: 5,
            batting_runs: 500,
            ..Default::default()
        },
    )
    .await?;

    let body = get_report(&server, "batting/runs/career").await?;
    let row = row_for(&body, player).expect("row");

    // Junior runs do not count.
    assert_eq!(row["values"]["batting_runs"], 100);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_season_scope_produces_one_row_per_season(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;

    let season_a = fixtures::create_season(&pool, 2004).await?;
    let season_b = fixtures::create_season(&pool, 2005).await?;
    let grade = fixtures::create_grade(&pool, "First Grade", true).await?;

    let player = fixtures::create_player(&pool, "Glen", "Gould").await?;
    for (season, runs) in [(season_a, 200), (season_b, 300)] {
        fixtures::create_statistic(
            &pool,
            player,
            season,
            grade,
            &StatisticSeed {
                batting_innings: 8,
                batting_runs: runs,
                ..Default::default()
            },
        )
        .await?;
    }

    let season_body = get_report(&server, "batting/runs/season").await?;
    let season_rows = season_body["rows"].as_array().expect("rows");
    assert_eq!(season_rows.len(), 2);
    assert_eq!(season_rows[0]["values"]["batting_runs"], 300);
    assert_eq!(season_rows[0]["season"]["label"], "2005/06");

    let career_body = get_report(&server, "batting/runs/career").await?;
    let career_rows = career_body["rows"].as_array().expect("rows");
    assert_eq!(career_rows.len(), 1);
    assert_eq!(career_rows[0]["values"]["batting_runs"], 500);
    // Span runs from the first year to the end of the last season.
    assert_eq!(career_rows[0]["values"]["seasons"], "2004-2006");

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_hundreds_counted_via_milestone_rows(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;

    let season = fixtures::create_season(&pool, 2004).await?;
    let grade = fixtures::create_grade(&pool, "First Grade", true).await?;

    let centurion = fixtures::create_player(&pool, "Hugh", "Hale").await?;
    let statistic = fixtures::create_statistic(
        &pool,
        centurion,
        season,
        grade,
        &StatisticSeed {
            batting_innings: 10,
            batting_runs: 600,
            ..Default::default()
        },
    )
    .await?;
    fixtures::add_hundred(&pool, statistic, 143, true, false).await?;
    fixtures::add_hundred(&pool, statistic, 101, false, true).await?;

    let plodder = fixtures::create_player(&pool, "Ivan", "Inch").await?;
    fixtures::create_statistic(
        &pool,
        plodder,
        season,
        grade,
        &StatisticSeed {
            batting_innings: 10,
            batting_runs: 90,
            ..Default::default()
        },
    )
    .await?;

    let body = get_report(&server, "batting/hundreds/career").await?;

    assert_eq!(row_for(&body, centurion).expect("row")["values"]["hundreds"], 2);
    // Zero, not absent: counts are always defined.
    assert_eq!(row_for(&body, plodder).expect("row")["values"]["hundreds"], 0);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_fielding_catches_count_outfield_catches_only(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;

    let season = fixtures::create_season(&pool, 2004).await?;
    let grade = fixtures::create_grade(&pool, "First Grade", true).await?;

    let fielder = fixtures::create_player(&pool, "Rod", "Reid").await?;
    fixtures::create_statistic(
        &pool,
        fielder,
        season,
        grade,
        &StatisticSeed {
            matches: 10,
            fielding_catches: 8,
            keeping_catches: 2,
            ..Default::default()
        },
    )
    .await?;

    // Pure keeper: every catch taken with the gloves on.
    let keeper = fixtures::create_player(&pool, "Sam", "Salt").await?;
    fixtures::create_statistic(
        &pool,
        keeper,
        season,
        grade,
        &StatisticSeed {
            matches: 10,
            keeping_catches: 30,
            ..Default::default()
        },
    )
    .await?;

    let fielding = get_report(&server, "fielding/catches/career").await?;
    assert_eq!(row_for(&fielding, fielder).expect("row")["values"]["catches"], 8);
    // No outfield catches, so the keeper misses the fielding leaderboard.
    assert!(row_for(&fielding, keeper).is_none());

    let keeping = get_report(&server, "wicketkeeping/catches/career").await?;
    assert_eq!(row_for(&keeping, keeper).expect("row")["values"]["keeping_catches"], 30);
    assert_eq!(row_for(&keeping, fielder).expect("row")["values"]["keeping_catches"], 2);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_bowling_report_renders_overs(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;

    let season = fixtures::create_season(&pool, 2004).await?;
    let grade = fixtures::create_grade(&pool, "First Grade", true).await?;

    let bowler = fixtures::create_player(&pool, "Jack", "James").await?;
    fixtures::create_statistic(
        &pool,
        bowler,
        season,
        grade,
        &StatisticSeed {
            bowling_balls: 285,
            bowling_runs: 310,
            bowling_wickets: 12,
            ..Default::default()
        },
    )
    .await?;

    let body = get_report(&server, "bowling/wickets/career").await?;
    let row = row_for(&body, bowler).expect("row");

    assert_eq!(row["values"]["overs"], "47.3");
    assert_eq!(row["values"]["bowling_wickets"], 12);

    // The column layout substitutes overs for the raw ball count.
    let columns = body["columns"].as_array().expect("columns");
    assert!(columns.iter().any(|c| c["key"] == "overs"));
    assert!(!columns.iter().any(|c| c["key"] == "bowling_balls"));

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_best_batting_innings_listing(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;

    let season = fixtures::create_season(&pool, 2004).await?;
    let grade = fixtures::create_grade(&pool, "First Grade", true).await?;

    let opener = fixtures::create_player(&pool, "Kurt", "Kane").await?;
    fixtures::create_statistic(
        &pool,
        opener,
        season,
        grade,
        &StatisticSeed {
            batting_high_score_runs: 143,
            batting_high_score_not_out: true,
            ..Default::default()
        },
    )
    .await?;

    let number_three = fixtures::create_player(&pool, "Liam", "Lowe").await?;
    fixtures::create_statistic(
        &pool,
        number_three,
        season,
        grade,
        &StatisticSeed {
            batting_high_score_runs: 99,
            ..Default::default()
        },
    )
    .await?;

    let body = get_report(&server, "batting/best-innings/career").await?;
    let rows = body["rows"].as_array().expect("rows");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["values"]["high_score"], "143*");
    assert_eq!(rows[0]["player"]["player_id"], opener);
    assert_eq!(rows[0]["grade"]["name"], "First Grade");
    assert_eq!(rows[1]["values"]["high_score"], "99");

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_best_bowling_orders_by_wickets_then_runs(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;

    let season = fixtures::create_season(&pool, 2004).await?;
    let grade = fixtures::create_grade(&pool, "First Grade", true).await?;

    let expensive = fixtures::create_player(&pool, "Mark", "Main").await?;
    fixtures::create_statistic(
        &pool,
        expensive,
        season,
        grade,
        &StatisticSeed {
            best_bowling_wickets: 6,
            best_bowling_runs: 80,
            ..Default::default()
        },
    )
    .await?;

    let miserly = fixtures::create_player(&pool, "Ned", "Nash").await?;
    fixtures::create_statistic(
        &pool,
        miserly,
        season,
        grade,
        &StatisticSeed {
            best_bowling_wickets: 6,
            best_bowling_runs: 21,
            ..Default::default()
        },
    )
    .await?;

    let body = get_report(&server, "bowling/best-innings/career").await?;
    let rows = body["rows"].as_array().expect("rows");

    assert_eq!(rows[0]["values"]["best_bowling"], "6/21");
    assert_eq!(rows[1]["values"]["best_bowling"], "6/80");

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_report_filters_by_grade_and_season(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;

    let season_a = fixtures::create_season(&pool, 2004).await?;
    let season_b = fixtures::create_season(&pool, 2005).await?;
    let firsts = fixtures::create_grade(&pool, "First Grade", true).await?;
    let seconds = fixtures::create_grade(&pool, "Second Grade", true).await?;

    let player = fixtures::create_player(&pool, "Owen", "Orr").await?;
    fixtures::create_statistic(
        &pool,
        player,
        season_a,
        firsts,
        &StatisticSeed {
            batting_runs: 100,
            batting_innings: 4,
            ..Default::default()
        },
    )
    .await?;
    fixtures::create_statistic(
        &pool,
        player,
        season_b,
        seconds,
        &StatisticSeed {
            batting_runs: 40,
            batting_innings: 2,
            ..Default::default()
        },
    )
    .await?;

    let body = get_report(
        &server,
        &format!("batting/runs/career?grade={}", seconds),
    )
    .await?;
    assert_eq!(row_for(&body, player).expect("row")["values"]["batting_runs"], 40);

    let body = get_report(
        &server,
        &format!("batting/runs/career?season={}", season_a),
    )
    .await?;
    assert_eq!(row_for(&body, player).expect("row")["values"]["batting_runs"], 100);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_report_limit_and_offset(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;

    let season = fixtures::create_season(&pool, 2004).await?;
    let grade = fixtures::create_grade(&pool, "First Grade", true).await?;

    for (name, runs) in [("Pat", 300), ("Quin", 200), ("Ray", 100)] {
        let player = fixtures::create_player(&pool, name, "Player").await?;
        fixtures::create_statistic(
            &pool,
            player,
            season,
            grade,
            &StatisticSeed {
                batting_runs: runs,
                batting_innings: 5,
                ..Default::default()
            },
        )
        .await?;
    }

    let body = get_report(&server, "batting/runs/career?limit=1&offset=1").await?;
    let rows = body["rows"].as_array().expect("rows");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["values"]["batting_runs"], 200);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_report_is_404(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool).await?;

    for path in [
        "batting/sixes-per-over/career",
        "juggling/catches/career",
        "batting/runs/decade",
        "misc/matches/season",
    ] {
        let response =
            reqwest::get(format!("{}/api/v1/reports/{}", server.url(), path)).await?;
        assert_eq!(response.status(), 404, "expected 404 for {}", path);
    }

    Ok(())
}
