//! JSON HTTP API.
//!
//! Routes (relative to the configured base path):
//! - `GET /healthz`
//! - `POST /tasks`, `GET /tasks?status=`
//! - `GET /tasks/ready`
//! - `GET|PUT|PATCH|DELETE /tasks/:id`
//! - `POST /tasks/:id/review`
//!
//! When a web directory is configured, unmatched paths fall back to static files.

pub mod dto;
pub mod error;
mod handlers;

pub use error::{ApiError, ErrorBody};

use crate::tasks::TaskStore;
use crate::traits::Clock;
use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Task persistence.
    pub store: Arc<dyn TaskStore>,
    /// Source of "now" for every request.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Bundle a store and a clock.
    pub fn new(store: impl TaskStore + 'static, clock: impl Clock + 'static) -> Self {
        Self { store: Arc::new(store), clock: Arc::new(clock) }
    }
}

/// Build the task API routes without any prefix.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/tasks", post(handlers::create_task).get(handlers::list_tasks))
        .route("/tasks/ready", get(handlers::ready_tasks))
        .route(
            "/tasks/:id",
            get(handlers::get_task)
                .put(handlers::update_task)
                .patch(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/tasks/:id/review", post(handlers::review_task))
}

/// Build the application router.
///
/// `base_path` is a normalised prefix such as `/api`, or empty to mount at the
/// root. `web_dir` enables static file serving for unmatched paths.
pub fn build_router(state: AppState, base_path: &str, web_dir: Option<&Path>) -> Router {
    let api = api_routes();
    let router = if base_path.is_empty() {
        api
    } else {
        Router::new().nest(base_path, api)
    };

    let router = match web_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
