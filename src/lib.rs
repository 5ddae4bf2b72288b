// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod app;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod leaderboards;
pub mod league_table;
pub mod models;
pub mod proxy;
pub mod session;
pub mod tui;
