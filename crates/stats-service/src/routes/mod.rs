//! HTTP routes.
//!
//! Defines the Axum router and application state. Read endpoints are
//! public; everything under `/api/v1/admin` sits behind the superuser
//! middleware.

use crate::config::Config;
use crate::handlers;
use crate::middleware::require_superuser;
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: PgPool,

    /// Service configuration.
    pub config: Config,
}

/// Build the application routes.
///
/// - `/health`, `/ready` - probes, public, unversioned
/// - `/api/v1/reports/{category}/{measure}/{scope}` - leaderboards, public
/// - `/api/v1/players`, `/api/v1/players/{id}` - player list and career
///   pages, public; `/api/v1/seasons` and `/api/v1/grades` listings too
/// - `/api/v1/admin/*` - entity CRUD, superuser bearer token required
/// - TraceLayer for request logging, 30 second request timeout
pub fn build_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route(
            "/api/v1/reports/:category/:measure/:scope",
            get(handlers::get_report),
        )
        .route("/api/v1/players", get(handlers::list_players))
        .route("/api/v1/players/:id", get(handlers::get_player))
        .route("/api/v1/seasons", get(handlers::list_seasons))
        .route("/api/v1/grades", get(handlers::list_grades))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/players", post(handlers::create_player))
        .route(
            "/players/:id",
            axum::routing::patch(handlers::update_player).delete(handlers::delete_player),
        )
        .route("/seasons", post(handlers::create_season))
        .route("/seasons/:id", delete(handlers::delete_season))
        .route("/grades", post(handlers::create_grade))
        .route("/grades/:id", delete(handlers::delete_grade))
        .route("/statistics", post(handlers::create_statistic))
        .route(
            "/statistics/:id",
            get(handlers::get_statistic)
                .put(handlers::replace_statistic)
                .delete(handlers::delete_statistic),
        )
        .route("/statistics/:id/hundreds", post(handlers::create_hundred))
        .route("/hundreds/:id", delete(handlers::delete_hundred))
        .route(
            "/statistics/:id/five-wicket-innings",
            post(handlers::create_five_wicket_inning),
        )
        .route(
            "/five-wicket-innings/:id",
            delete(handlers::delete_five_wicket_inning),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_superuser,
        ))
        .with_state(state);

    public_routes
        .nest("/api/v1/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
        assert_clone::<Config>();
    }
}
