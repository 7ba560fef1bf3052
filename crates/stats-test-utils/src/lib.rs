//! Shared test utilities for the statistics service.
//!
//! - [`server_harness`] - spawn a real server over a per-test database
//! - [`fixtures`] - direct-SQL seed helpers

pub mod fixtures;
pub mod server_harness;

pub use server_harness::{TestStatsServer, TEST_ADMIN_TOKEN};
