// ABOUTME: Library module for chdump
// ABOUTME: Exports all core functionality for use in binary and tests

pub mod clickhouse;
pub mod config;
pub mod ddl;
pub mod dump;
pub mod filters;
pub mod schema;
pub mod utils;
