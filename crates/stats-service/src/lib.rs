//! Cricket statistics service library.
//!
//! Records per-player, per-season, per-grade cricket statistics and serves
//! leaderboard reports and career pages over a JSON API:
//!
//! - Report catalog (most runs, best average, most wickets, ...)
//! - Per-player career pages (totals, per-grade, per-season, milestones)
//! - Superuser CRUD for players, seasons, grades, statistics, milestones
//!
//! # Architecture
//!
//! The service follows the Handler -> Repository pattern, with the report
//! engine as a separate layer:
//!
//! ```text
//! routes/mod.rs -> handlers/*.rs -> repositories/*.rs
//!                               \-> reports/{metrics,query,catalog}.rs
//! ```
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `errors` - Error types with HTTP status code mapping
//! - `models` - Data models and compound-figure parsing
//! - `repositories` - Database access for CRUD entities
//! - `reports` - Declarative aggregate metrics and report queries
//! - `handlers` - HTTP request handlers
//! - `middleware` - Superuser gate for mutating endpoints
//! - `routes` - Axum router setup

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod reports;
pub mod repositories;
pub mod routes;
