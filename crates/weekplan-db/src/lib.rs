//! SQLite persistence for the weekly planner: connection config, pool and
//! migrations, row models, and query functions.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
