//! Roster player registry.
//!
//! REST API for player records: CRUD, filtered listing with paging and
//! sorting, and counting. Records persist in PostgreSQL, or in process
//! memory when no database is configured.

pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
