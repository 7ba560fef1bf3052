//! The report engine.
//!
//! Three layers:
//!
//! - [`metrics`] - declarative aggregate columns, composed by merging
//! - [`query`] - grouped SELECT assembly, execution, and row decoding
//! - [`catalog`] - named leaderboards built from the two layers above

pub mod catalog;
pub mod metrics;
pub mod query;

pub use catalog::{lookup, ReportKind, ReportSpec, Scope};
pub use query::{BestInnings, Grouping, ReportQuery, ReportRow};
