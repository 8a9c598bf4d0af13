//! Daily planner backend: a flat-file day store, its HTTP facade, and the
//! context-aware chat client used by the console front end.

pub mod ai;
pub mod config;
pub mod context;
pub mod controllers;
pub mod error;
pub mod http;
pub mod mock_data;
pub mod store;
pub mod ui;

use std::sync::Arc;

use store::DayStore;

pub struct AppState {
    pub store: Arc<DayStore>,
}
