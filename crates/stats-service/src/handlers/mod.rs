//! HTTP request handlers.

pub mod grades;
pub mod health;
pub mod milestones;
pub mod players;
pub mod reports;
pub mod seasons;
pub mod statistics;

pub use grades::{create_grade, delete_grade, list_grades};
pub use health::{health_check, readiness_check};
pub use milestones::{
    create_five_wicket_inning, create_hundred, delete_five_wicket_inning, delete_hundred,
};
pub use players::{create_player, delete_player, get_player, list_players, update_player};
pub use reports::get_report;
pub use seasons::{create_season, delete_season, list_seasons};
pub use statistics::{create_statistic, delete_statistic, get_statistic, replace_statistic};
