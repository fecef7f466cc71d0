//! Habit tracker backend
//!
//! Account registration, password login, bearer-token sessions and
//! per-account habit tracking over a JSON HTTP API.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod habits;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
