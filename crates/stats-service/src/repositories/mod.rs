//! Database repositories.
//!
//! One repository per entity, with static async functions taking the pool.
//! All queries use parameterized statements.

pub mod grades;
pub mod milestones;
pub mod players;
pub mod seasons;
pub mod statistics;

pub use grades::GradesRepository;
pub use milestones::MilestonesRepository;
pub use players::PlayersRepository;
pub use seasons::SeasonsRepository;
pub use statistics::StatisticsRepository;
