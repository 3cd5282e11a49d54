//! HTTP request handlers.
//!
//! Handlers validate input, read the clock once, run the blocking store call on
//! the blocking pool and render the result.

use super::dto::{ContentRequest, ListQuery, ReviewRequest, TaskView};
use super::error::ApiError;
use super::AppState;
use crate::error::Result;
use crate::tasks::{validate_content, ReviewOutcome, Status, TaskStore};
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;

/// Run a store operation on the blocking thread pool.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn TaskStore) -> Result<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(store.as_ref())).await?
}

/// Decode a JSON body whatever its `Content-Type` says.
fn body<T: DeserializeOwned>(payload: &Bytes) -> Result<T> {
    serde_json::from_slice(payload).map_err(|e| {
        tracing::debug!("rejected request body: {e}");
        e.into()
    })
}

pub(super) async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn create_task(
    State(state): State<AppState>,
    payload: Bytes,
) -> std::result::Result<(StatusCode, Json<TaskView>), ApiError> {
    let req: ContentRequest = body(&payload)?;
    let (question, answer) = validate_content(&req.question, &req.answer)?;
    let now = state.clock.now();

    let task = with_store(&state, move |store| store.create_task(&question, &answer, now)).await?;
    Ok((StatusCode::CREATED, Json(TaskView::new(task, now))))
}

/// Render every task whose status at request time satisfies `keep`.
async fn list_matching(
    state: &AppState,
    keep: impl Fn(Status) -> bool,
) -> std::result::Result<Json<Vec<TaskView>>, ApiError> {
    let now = state.clock.now();
    let tasks = with_store(state, |store| store.list_tasks()).await?;

    let views = tasks
        .into_iter()
        .map(|task| TaskView::new(task, now))
        .filter(|view| keep(view.status))
        .collect();
    Ok(Json(views))
}

pub(super) async fn list_tasks(
    State(state): State<AppState>,
    params: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> std::result::Result<Json<Vec<TaskView>>, ApiError> {
    let Query(pairs) = params.map_err(|rejection| {
        tracing::debug!("rejected query string: {rejection}");
        ApiError::InvalidQuery
    })?;
    let query = ListQuery::from_pairs(pairs);
    list_matching(&state, |status| query.matches(status)).await
}

pub(super) async fn ready_tasks(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<TaskView>>, ApiError> {
    list_matching(&state, |status| status == Status::Ready).await
}

pub(super) async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<Json<TaskView>, ApiError> {
    let task = with_store(&state, move |store| store.get_task(&id)).await?;
    Ok(Json(TaskView::new(task, state.clock.now())))
}

pub(super) async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Bytes,
) -> std::result::Result<Json<TaskView>, ApiError> {
    let req: ContentRequest = body(&payload)?;
    let (question, answer) = validate_content(&req.question, &req.answer)?;
    let now = state.clock.now();

    let task =
        with_store(&state, move |store| store.update_content(&id, &question, &answer, now)).await?;
    Ok(Json(TaskView::new(task, now)))
}

pub(super) async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<StatusCode, ApiError> {
    with_store(&state, move |store| store.delete_task(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn review_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Bytes,
) -> std::result::Result<Json<TaskView>, ApiError> {
    let req: ReviewRequest = body(&payload)?;
    let outcome = ReviewOutcome::from_str(&req.result)?;
    let now = state.clock.now();

    let task = with_store(&state, move |store| store.review_task(&id, outcome, now)).await?;
    Ok(Json(TaskView::new(task, now)))
}
