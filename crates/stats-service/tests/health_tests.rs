//! Health and readiness endpoint tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use anyhow::Result;
use sqlx::PgPool;
use stats_test_utils::TestStatsServer;

#[sqlx::test(migrations = "../../migrations")]
async fn test_health_returns_ok(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool).await?;

    let response = reqwest::get(format!("{}/health", server.url())).await?;

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await?, "OK");

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_ready_with_healthy_database(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool).await?;

    let response = reqwest::get(format!("{}/ready", server.url())).await?;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "healthy");

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_ready_with_closed_pool(pool: PgPool) -> Result<()> {
    let server = TestStatsServer::spawn(pool.clone()).await?;
    pool.close().await;

    let response = reqwest::get(format!("{}/ready", server.url())).await?;

    assert_eq!(response.status(), 503);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["status"], "not_ready");
    assert_eq!(body["database"], "unhealthy");

    Ok(())
}
