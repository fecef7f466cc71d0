//! Habit HTTP handlers
//!
//! Every handler takes `AuthenticatedAccount` and passes its id down as the
//! owner scope.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use super::AuthenticatedAccount;
use crate::error::ApiResult;
use crate::models::{Habit, HabitFilter, HabitInput, HabitLog, MessageResponse};
use crate::state::AppState;

/// POST /habit
pub async fn create_habit(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    payload: Result<Json<HabitInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(input) = payload?;
    input.validate()?;

    let habit = state
        .habit_service
        .create(&account.account_id, input)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_id("Habit created", habit.id)),
    ))
}

/// GET /habits
pub async fn list_habits(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
) -> ApiResult<Json<Vec<Habit>>> {
    let habits = state
        .habit_service
        .list(&account.account_id, &HabitFilter::default())
        .await?;

    Ok(Json(habits))
}

/// GET /habits/filter?category=&frequency=
pub async fn filter_habits(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    query: Result<Query<HabitFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<Habit>>> {
    let Query(filter) = query?;
    let habits = state
        .habit_service
        .list(&account.account_id, &filter)
        .await?;

    Ok(Json(habits))
}

/// PUT /habit/:id
pub async fn update_habit(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<HabitInput>, JsonRejection>,
) -> ApiResult<Json<Habit>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    input.validate()?;

    let habit = state
        .habit_service
        .update(&account.account_id, id, &input)
        .await?;

    Ok(Json(habit))
}

/// DELETE /habit/:id
pub async fn delete_habit(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = path?;
    state.habit_service.delete(&account.account_id, id).await?;

    Ok(Json(MessageResponse::new("Habit deleted")))
}

/// POST /habit/:id/complete
pub async fn complete_habit(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<HabitLog>> {
    let Path(id) = path?;
    let log = state.habit_service.complete(&account.account_id, id).await?;

    Ok(Json(log))
}

/// GET /habit/:id/history
pub async fn habit_history(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Vec<HabitLog>>> {
    let Path(id) = path?;
    let logs = state.habit_service.history(&account.account_id, id).await?;

    Ok(Json(logs))
}
