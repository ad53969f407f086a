use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::AppState;
use crate::application::board_service::BoardService;
use crate::domain::category::Category;
use crate::http::types::{ApiError, success};

pub fn router<S: BoardService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(list_categories::<S>)
                .post(save_category::<S>)
                .delete(delete_category::<S>),
        )
        .with_state(state)
}

async fn list_categories<S: BoardService>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state
        .service
        .list_categories()
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(categories))
}

async fn save_category<S: BoardService>(
    State(state): State<AppState<S>>,
    Json(category): Json<Category>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .service
        .save_category(category)
        .await
        .map_err(ApiError::internal)?;
    Ok(success())
}

#[derive(Deserialize)]
struct DeleteParams {
    id: Option<String>,
}

async fn delete_category<S: BoardService>(
    State(state): State<AppState<S>>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("missing id"))?;
    state
        .service
        .delete_category(&id)
        .await
        .map_err(ApiError::internal)?;
    Ok(success())
}
