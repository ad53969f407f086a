use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::AppState;
use crate::application::board_service::BoardService;
use crate::domain::task::Task;
use crate::http::types::{ApiError, success};

pub fn router<S: BoardService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route(
            "/api/tasks",
            get(list_tasks::<S>)
                .post(save_task::<S>)
                .delete(delete_task::<S>),
        )
        .with_state(state)
}

async fn list_tasks<S: BoardService>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.service.list_tasks().await.map_err(ApiError::internal)?;
    Ok(Json(tasks))
}

async fn save_task<S: BoardService>(
    State(state): State<AppState<S>>,
    Json(task): Json<Task>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .service
        .save_task(task)
        .await
        .map_err(ApiError::internal)?;
    Ok(success())
}

#[derive(Deserialize)]
struct DeleteParams {
    id: Option<String>,
}

async fn delete_task<S: BoardService>(
    State(state): State<AppState<S>>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("missing id"))?;
    state
        .service
        .delete_task(&id)
        .await
        .map_err(ApiError::internal)?;
    Ok(success())
}
