//! Habit routes, all behind the bearer-token extractor

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::habit;
use crate::state::AppState;

pub fn habit_routes() -> Router<AppState> {
    Router::new()
        .route("/habit", post(habit::create_habit))
        .route("/habits", get(habit::list_habits))
        .route("/habits/filter", get(habit::filter_habits))
        .route(
            "/habit/:id",
            put(habit::update_habit).delete(habit::delete_habit),
        )
        .route("/habit/:id/complete", post(habit::complete_habit))
        .route("/habit/:id/history", get(habit::habit_history))
}
